//! SeaORM implementation of the DeliveryType repository

use crate::models::delivery_type;
use crate::serializers::DeliveryTypeSerializer;

sea_orm_repository!(
    /// SeaORM-based implementation of the DeliveryType repository
    SeaOrmDeliveryTypeRepository,
    delivery_type,
    DeliveryTypeSerializer,
    model = "DeliveryType",
    resource = "delivery-types",
    table = "delivery_types",
);
