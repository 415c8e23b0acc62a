//! SeaORM implementation of the Store repository

use crate::models::store;
use crate::serializers::StoreSerializer;

sea_orm_repository!(
    /// SeaORM-based implementation of the Store repository
    SeaOrmStoreRepository,
    store,
    StoreSerializer,
    model = "Store",
    resource = "stores",
    table = "stores",
);
