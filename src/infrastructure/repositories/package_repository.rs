//! SeaORM implementation of the Package repository

use crate::models::package;
use crate::serializers::PackageSerializer;

sea_orm_repository!(
    /// SeaORM-based implementation of the Package repository
    SeaOrmPackageRepository,
    package,
    PackageSerializer,
    model = "Package",
    resource = "packages",
    table = "packages",
);
