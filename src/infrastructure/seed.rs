use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, Set};

use crate::domain::{DomainError, Repository};
use crate::infrastructure::auth::hash_password;
use crate::infrastructure::repositories::*;
use crate::models::{staff_user, Gender};
use crate::serializers::*;

/// Create the staff account unless one with this username already exists
pub async fn ensure_admin_user(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<(), DomainError> {
    let now = Utc::now().to_rfc3339();
    let admin = staff_user::ActiveModel {
        username: Set(username.to_owned()),
        password_hash: Set(hash_password(password)?),
        role: Set("admin".to_owned()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let res = staff_user::Entity::insert(admin)
        .on_conflict(
            OnConflict::column(staff_user::Column::Username)
                .do_nothing()
                .to_owned(),
        )
        .exec(db)
        .await;

    match res {
        Ok(_) => tracing::info!("Staff user '{}' created", username),
        Err(DbErr::RecordNotInserted) => tracing::debug!("Staff user '{}' already exists", username),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn date(y: i32, m: u32, d: u32) -> Result<NaiveDate, DomainError> {
    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| DomainError::Internal(format!("invalid seed date {}-{}-{}", y, m, d)))
}

fn time(h: u32, m: u32) -> Result<NaiveTime, DomainError> {
    NaiveTime::from_hms_opt(h, m, 0)
        .ok_or_else(|| DomainError::Internal(format!("invalid seed time {}:{}", h, m)))
}

/// A small catalogue: two stores, a few coffees, one customer and an order
/// that is out for delivery. Does nothing once any store exists.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DomainError> {
    let stores = SeaOrmStoreRepository::new(db.clone());
    if stores.count().await? > 0 {
        tracing::info!("Demo data already present, skipping");
        return Ok(());
    }

    // 1. Catalogue
    let categories = SeaOrmCategoryRepository::new(db.clone());
    let mut category_ids = Vec::new();
    for name in ["Espresso", "Filter", "Decaf"] {
        let created = categories
            .create(CategorySerializer {
                id: None,
                category: name.to_owned(),
            })
            .await?;
        category_ids.extend(created.id);
    }

    let downtown = stores
        .create(StoreSerializer {
            id: None,
            store_name: "Downtown Roastery".to_owned(),
            store_phone: "+1 555 0100".to_owned(),
            store_address: "12 Bean Street".to_owned(),
            open_time: Some(time(7, 0)?),
            close_time: Some(time(19, 30)?),
        })
        .await?;
    stores
        .create(StoreSerializer {
            id: None,
            store_name: "Harbour Kiosk".to_owned(),
            store_phone: "+1 555 0101".to_owned(),
            store_address: "Pier 4".to_owned(),
            open_time: None,
            close_time: None,
        })
        .await?;

    let products = SeaOrmProductRepository::new(db.clone());
    let expires = Utc::now() + Duration::days(180);
    let mut product_ids = Vec::new();
    for (name, info, category, size) in [
        ("Ethiopia Yirgacheffe", "Floral, citrus", category_ids[..1].to_vec(), 250),
        ("Colombia Huila", "Caramel, red apple", category_ids[..2].to_vec(), 500),
        ("Swiss Water Decaf", "Chocolate, nutty", category_ids[2..].to_vec(), 250),
    ] {
        let created = products
            .create(ProductSerializer {
                id: None,
                name: name.to_owned(),
                info: info.to_owned(),
                store_product: downtown.id,
                category,
                stock: true,
                exp_date: expires,
                product_size: size,
                product_weight: size,
            })
            .await?;
        product_ids.extend(created.id);
    }

    // 2. A customer with one order
    let customer = SeaOrmCustomerRepository::new(db.clone())
        .create(CustomerSerializer {
            id: None,
            username: Some("ada".to_owned()),
            name: "Ada".to_owned(),
            lastname: "Lovelace".to_owned(),
            date_birth: date(1990, 12, 10)?,
            email: "ada@example.com".to_owned(),
            gender: Gender::Female,
        })
        .await?;

    let package = SeaOrmPackageRepository::new(db.clone())
        .create(PackageSerializer {
            id: None,
            package_type: "Valve bag".to_owned(),
            package_price: Some(1),
            package_desc: "Resealable bag with one-way valve".to_owned(),
            package_volume: Some(250),
            package_average_weight: "15g".to_owned(),
            image: None,
            package_images: None,
        })
        .await?;

    let discount = SeaOrmDiscountRepository::new(db.clone())
        .create(DiscountSerializer {
            id: None,
            products_id: product_ids.first().copied(),
            store_id: downtown.id,
            discount_start_time: Some(Utc::now()),
            discount_end_time: Some(Utc::now() + Duration::days(14)),
            discount_type: "percent".to_owned(),
            discount_review: "Launch week".to_owned(),
        })
        .await?;

    let trade = SeaOrmTradeRepository::new(db.clone())
        .create(TradeSerializer {
            id: None,
            product: product_ids.first().copied(),
            amount: Some(2),
            price: 24.5,
            discount_id: discount.id.into_iter().collect(),
            user_id: customer.id,
            location: "12 Bean Street".to_owned(),
            packaging: package.id,
            date: None,
        })
        .await?;

    let standard = SeaOrmDeliveryTypeRepository::new(db.clone())
        .create(DeliveryTypeSerializer {
            id: None,
            r#type: "Standard".to_owned(),
        })
        .await?;

    let rating = SeaOrmRatingsRepository::new(db.clone())
        .create(RatingsSerializer {
            id: None,
            product_id: product_ids.first().copied(),
            product_rating: Some(5),
            store_rating: Some(4),
            delivery_rating: None,
            package_rating: Some(4),
        })
        .await?;

    let customer_id = customer
        .id
        .ok_or_else(|| DomainError::Internal("seeded customer has no id".to_string()))?;
    SeaOrmDeliveryRepository::new(db.clone())
        .create(DeliverySerializer {
            id: None,
            user_id: customer_id,
            product_id: product_ids.clone(),
            package_id: package.id.into_iter().collect(),
            trade_id: trade.id,
            store_id: downtown.id,
            delivery_type: standard.id,
            delivery_price: Some(5),
            date: Utc::now().date_naive(),
            during: Utc::now() + Duration::hours(2),
            delivery_status: rating.id,
        })
        .await?;

    // 3. Feedback
    SeaOrmReviewRepository::new(db.clone())
        .create(ReviewSerializer {
            id: None,
            comments: "Bright and juicy, great as pour-over.".to_owned(),
            store_id: downtown.id,
            product_id: product_ids.first().copied(),
        })
        .await?;

    tracing::info!(
        "Seeded {} products, {} categories and one delivery",
        product_ids.len(),
        category_ids.len()
    );
    Ok(())
}
