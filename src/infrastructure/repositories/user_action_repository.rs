//! SeaORM implementation of the UserAction repository

use crate::models::user_action;
use crate::serializers::UserActionSerializer;

sea_orm_repository!(
    /// SeaORM-based implementation of the UserAction repository
    SeaOrmUserActionRepository,
    user_action,
    UserActionSerializer,
    model = "UserAction",
    resource = "user-actions",
    table = "user_actions",
);
