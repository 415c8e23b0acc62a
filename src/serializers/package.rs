use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::FieldSpec;
use crate::models::package::{ActiveModel, Model};

// `package_volumn` and `package_avarage_weight` are the published wire names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PackageSerializer {
    pub id: Option<i32>,
    pub package_type: String,
    pub package_price: Option<i32>,
    pub package_desc: String,
    #[serde(rename = "package_volumn")]
    pub package_volume: Option<i32>,
    #[serde(rename = "package_avarage_weight")]
    pub package_average_weight: String,
    pub image: Option<String>,
    pub package_images: Option<String>,
}

impl PackageSerializer {
    pub const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::char("package_type", 70),
        FieldSpec::integer("package_price").blank().nullable(),
        FieldSpec::text("package_desc", 100),
        FieldSpec::integer("package_volumn").blank().nullable(),
        FieldSpec::text("package_avarage_weight", 300),
        FieldSpec::image("image"),
        FieldSpec::image("package_images"),
    ];

    pub fn label(&self) -> String {
        self.package_type.clone()
    }
}

impl From<Model> for PackageSerializer {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            package_type: model.package_type,
            package_price: model.package_price,
            package_desc: model.package_desc,
            package_volume: model.package_volume,
            package_average_weight: model.package_average_weight,
            image: model.image,
            package_images: model.package_images,
        }
    }
}

impl From<PackageSerializer> for ActiveModel {
    fn from(package: PackageSerializer) -> Self {
        Self {
            id: package.id.map_or(NotSet, Set),
            package_type: Set(package.package_type),
            package_price: Set(package.package_price),
            package_desc: Set(package.package_desc),
            package_volume: Set(package.package_volume),
            package_average_weight: Set(package.package_average_weight),
            image: Set(package.image),
            package_images: Set(package.package_images),
        }
    }
}
