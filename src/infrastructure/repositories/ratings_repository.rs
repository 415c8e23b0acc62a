//! SeaORM implementation of the Ratings repository

use crate::models::ratings;
use crate::serializers::RatingsSerializer;

sea_orm_repository!(
    /// SeaORM-based implementation of the Ratings repository
    SeaOrmRatingsRepository,
    ratings,
    RatingsSerializer,
    model = "Ratings",
    resource = "ratings",
    table = "ratings",
);
