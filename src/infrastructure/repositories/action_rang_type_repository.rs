//! SeaORM implementation of the ActionRangType repository

use crate::models::action_rang_type;
use crate::serializers::ActionRangTypeSerializer;

sea_orm_repository!(
    /// SeaORM-based implementation of the ActionRangType repository
    SeaOrmActionRangTypeRepository,
    action_rang_type,
    ActionRangTypeSerializer,
    model = "ActionRangType",
    resource = "action-rang-types",
    table = "action_rang_types",
);
