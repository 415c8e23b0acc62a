use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

/// Tables in dependency order. Every foreign key cascades on delete.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS customers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT,
        name TEXT NOT NULL,
        lastname TEXT NOT NULL,
        date_birth TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        gender TEXT NOT NULL CHECK (gender IN ('male', 'female'))
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS stores (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        store_name TEXT NOT NULL,
        store_phone TEXT NOT NULL,
        store_address TEXT NOT NULL,
        open_time TEXT,
        close_time TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS categories (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        category TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        info TEXT NOT NULL,
        store_product INTEGER REFERENCES stores(id) ON DELETE CASCADE,
        stock BOOLEAN NOT NULL,
        exp_date TEXT NOT NULL,
        product_size INTEGER NOT NULL CHECK (product_size BETWEEN 0 AND 32767),
        product_weight INTEGER NOT NULL CHECK (product_weight BETWEEN 0 AND 32767)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS product_categories (
        product_id INTEGER NOT NULL,
        category_id INTEGER NOT NULL,
        PRIMARY KEY (product_id, category_id),
        FOREIGN KEY (product_id) REFERENCES products(id) ON DELETE CASCADE,
        FOREIGN KEY (category_id) REFERENCES categories(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS packages (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        package_type TEXT NOT NULL,
        package_price INTEGER,
        package_desc TEXT NOT NULL,
        package_volume INTEGER,
        package_average_weight TEXT NOT NULL,
        image TEXT,
        package_images TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS discounts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        products_id INTEGER REFERENCES products(id) ON DELETE CASCADE,
        store_id INTEGER REFERENCES stores(id) ON DELETE CASCADE,
        discount_start_time TEXT,
        discount_end_time TEXT,
        discount_type TEXT NOT NULL,
        discount_review TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS trades (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        product INTEGER REFERENCES products(id) ON DELETE CASCADE,
        amount INTEGER,
        price REAL NOT NULL,
        user_id INTEGER REFERENCES customers(id) ON DELETE CASCADE,
        location TEXT NOT NULL,
        packaging INTEGER REFERENCES packages(id) ON DELETE CASCADE,
        date TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS trade_discounts (
        trade_id INTEGER NOT NULL,
        discount_id INTEGER NOT NULL,
        PRIMARY KEY (trade_id, discount_id),
        FOREIGN KEY (trade_id) REFERENCES trades(id) ON DELETE CASCADE,
        FOREIGN KEY (discount_id) REFERENCES discounts(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS ratings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        product_id INTEGER REFERENCES products(id) ON DELETE CASCADE,
        product_rating INTEGER CHECK (product_rating BETWEEN 0 AND 5),
        store_rating INTEGER CHECK (store_rating BETWEEN 0 AND 5),
        delivery_rating INTEGER CHECK (delivery_rating BETWEEN 0 AND 5),
        package_rating INTEGER CHECK (package_rating BETWEEN 0 AND 5)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS action_types (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        type TEXT NOT NULL,
        rang INTEGER NOT NULL CHECK (rang BETWEEN 0 AND 32767)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS action_rang_types (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        rang_name INTEGER NOT NULL CHECK (rang_name BETWEEN 0 AND 32767)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS user_actions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER REFERENCES customers(id) ON DELETE CASCADE,
        action_type INTEGER REFERENCES action_types(id) ON DELETE CASCADE,
        action_rang INTEGER REFERENCES action_rang_types(id) ON DELETE CASCADE,
        during TEXT NOT NULL,
        ended BOOLEAN NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS delivery_types (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        type TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS deliveries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES customers(id) ON DELETE CASCADE,
        trade_id INTEGER REFERENCES trades(id) ON DELETE CASCADE,
        store_id INTEGER REFERENCES stores(id) ON DELETE CASCADE,
        delivery_type INTEGER REFERENCES delivery_types(id) ON DELETE CASCADE,
        delivery_price INTEGER CHECK (delivery_price BETWEEN 0 AND 32767),
        date TEXT NOT NULL,
        during TEXT NOT NULL,
        delivery_status INTEGER REFERENCES ratings(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS delivery_products (
        delivery_id INTEGER NOT NULL,
        product_id INTEGER NOT NULL,
        PRIMARY KEY (delivery_id, product_id),
        FOREIGN KEY (delivery_id) REFERENCES deliveries(id) ON DELETE CASCADE,
        FOREIGN KEY (product_id) REFERENCES products(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS delivery_packages (
        delivery_id INTEGER NOT NULL,
        package_id INTEGER NOT NULL,
        PRIMARY KEY (delivery_id, package_id),
        FOREIGN KEY (delivery_id) REFERENCES deliveries(id) ON DELETE CASCADE,
        FOREIGN KEY (package_id) REFERENCES packages(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS reviews (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        comments TEXT NOT NULL,
        store_id INTEGER REFERENCES stores(id) ON DELETE CASCADE,
        product_id INTEGER REFERENCES products(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS staff_users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        role TEXT NOT NULL DEFAULT 'staff',
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
];

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();

    // Cascading deletes need foreign key enforcement
    db.execute(Statement::from_string(
        backend,
        "PRAGMA foreign_keys = ON".to_owned(),
    ))
    .await?;

    for sql in SCHEMA {
        db.execute(Statement::from_string(backend, sql.to_string()))
            .await?;
    }

    // Reverse lookups on junction tables
    for sql in [
        "CREATE INDEX IF NOT EXISTS idx_product_categories_category ON product_categories(category_id)",
        "CREATE INDEX IF NOT EXISTS idx_trade_discounts_discount ON trade_discounts(discount_id)",
        "CREATE INDEX IF NOT EXISTS idx_delivery_products_product ON delivery_products(product_id)",
        "CREATE INDEX IF NOT EXISTS idx_delivery_packages_package ON delivery_packages(package_id)",
    ] {
        db.execute(Statement::from_string(backend, sql.to_owned()))
            .await?;
    }

    tracing::debug!("Schema ready ({} tables)", SCHEMA.len());
    Ok(())
}
