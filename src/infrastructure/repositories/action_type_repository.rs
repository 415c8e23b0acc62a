//! SeaORM implementation of the ActionType repository

use crate::models::action_type;
use crate::serializers::ActionTypeSerializer;

sea_orm_repository!(
    /// SeaORM-based implementation of the ActionType repository
    SeaOrmActionTypeRepository,
    action_type,
    ActionTypeSerializer,
    model = "ActionType",
    resource = "action-types",
    table = "action_types",
);
