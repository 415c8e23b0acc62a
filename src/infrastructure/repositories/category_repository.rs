//! SeaORM implementation of the Category repository

use crate::models::category;
use crate::serializers::CategorySerializer;

sea_orm_repository!(
    /// SeaORM-based implementation of the Category repository
    SeaOrmCategoryRepository,
    category,
    CategorySerializer,
    model = "Category",
    resource = "categories",
    table = "categories",
);
