//! SeaORM implementation of the Review repository

use crate::models::review;
use crate::serializers::ReviewSerializer;

sea_orm_repository!(
    /// SeaORM-based implementation of the Review repository
    SeaOrmReviewRepository,
    review,
    ReviewSerializer,
    model = "Review",
    resource = "reviews",
    table = "reviews",
);
