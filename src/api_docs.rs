use crate::api;
use crate::api::admin::{LoginRequest, LoginResponse, ModelSummary};
use crate::domain::Repository;
use crate::infrastructure::{
    SeaOrmActionRangTypeRepository, SeaOrmActionTypeRepository, SeaOrmCategoryRepository,
    SeaOrmCustomerRepository, SeaOrmDeliveryRepository, SeaOrmDeliveryTypeRepository,
    SeaOrmDiscountRepository, SeaOrmPackageRepository, SeaOrmProductRepository,
    SeaOrmRatingsRepository, SeaOrmReviewRepository, SeaOrmStoreRepository,
    SeaOrmTradeRepository, SeaOrmUserActionRepository,
};
use crate::models::Gender;
use crate::serializers::*;
use utoipa::openapi::path::{
    OperationBuilder, ParameterBuilder, ParameterIn, PathItem, PathItemBuilder, PathItemType,
};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::openapi::{
    ArrayBuilder, ContentBuilder, KnownFormat, ObjectBuilder, Ref, RefOr, Required,
    ResponseBuilder, Schema, SchemaFormat, SchemaType,
};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::admin::login,
        api::admin::index,
        api::admin::changelist,
        api::admin::change_view,
        api::admin::delete,
    ),
    components(
        schemas(
            Gender,
            CustomerSerializer,
            TradeSerializer,
            ProductSerializer,
            RatingsSerializer,
            CategorySerializer,
            StoreSerializer,
            DiscountSerializer,
            UserActionSerializer,
            ActionTypeSerializer,
            ActionRangTypeSerializer,
            DeliverySerializer,
            DeliveryTypeSerializer,
            PackageSerializer,
            ReviewSerializer,
            LoginRequest,
            LoginResponse,
            ModelSummary,
        )
    ),
    modifiers(&BearerAuth, &ResourcePaths),
    tags(
        (name = "coffee-app", description = "Coffee shop API"),
        (name = "admin", description = "Staff-only administration")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Collection and detail paths for every resource mounted by `resource_routes`
struct ResourcePaths;

impl Modify for ResourcePaths {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        add_resource::<SeaOrmCustomerRepository>(openapi);
        add_resource::<SeaOrmTradeRepository>(openapi);
        add_resource::<SeaOrmProductRepository>(openapi);
        add_resource::<SeaOrmRatingsRepository>(openapi);
        add_resource::<SeaOrmCategoryRepository>(openapi);
        add_resource::<SeaOrmStoreRepository>(openapi);
        add_resource::<SeaOrmDiscountRepository>(openapi);
        add_resource::<SeaOrmUserActionRepository>(openapi);
        add_resource::<SeaOrmActionTypeRepository>(openapi);
        add_resource::<SeaOrmActionRangTypeRepository>(openapi);
        add_resource::<SeaOrmDeliveryRepository>(openapi);
        add_resource::<SeaOrmDeliveryTypeRepository>(openapi);
        add_resource::<SeaOrmPackageRepository>(openapi);
        add_resource::<SeaOrmReviewRepository>(openapi);
    }
}

fn add_resource<R: Repository>(openapi: &mut utoipa::openapi::OpenApi) {
    let schema = format!("{}Serializer", R::MODEL);
    let record = || RefOr::<Schema>::from(Ref::from_schema_name(schema.clone()));
    let json = |body: RefOr<Schema>| ContentBuilder::new().schema(body).build();
    let operation = |summary: String| {
        OperationBuilder::new()
            .tags(Some(vec![R::RESOURCE.to_string()]))
            .summary(Some(summary))
    };
    let ok = |description: &str, body: RefOr<Schema>| {
        ResponseBuilder::new()
            .description(description)
            .content("application/json", json(body))
            .build()
    };
    let status = |description: &str| ResponseBuilder::new().description(description).build();
    let request_body = || {
        RequestBodyBuilder::new()
            .content("application/json", json(record()))
            .required(Some(Required::True))
            .build()
    };

    let list: RefOr<Schema> = RefOr::T(Schema::Array(ArrayBuilder::new().items(record()).build()));
    let collection: PathItem = PathItemBuilder::new()
        .operation(
            PathItemType::Get,
            operation(format!("List {} ordered by id", R::RESOURCE))
                .response("200", ok("All rows", list))
                .build(),
        )
        .operation(
            PathItemType::Post,
            operation(format!("Create a {}", R::MODEL))
                .request_body(Some(request_body()))
                .response("201", ok("Created row", record()))
                .response("400", status("Field errors keyed by field name"))
                .build(),
        )
        .build();

    let id = ParameterBuilder::new()
        .name("id")
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .schema(Some(RefOr::T(Schema::Object(
            ObjectBuilder::new()
                .schema_type(SchemaType::Integer)
                .format(Some(SchemaFormat::KnownFormat(KnownFormat::Int32)))
                .build(),
        ))))
        .build();
    let detail: PathItem = PathItemBuilder::new()
        .operation(
            PathItemType::Get,
            operation(format!("Retrieve a {}", R::MODEL))
                .parameter(id.clone())
                .response("200", ok("The row", record()))
                .response("404", status("No row with this id"))
                .build(),
        )
        .operation(
            PathItemType::Put,
            operation(format!("Replace a {}", R::MODEL))
                .parameter(id.clone())
                .request_body(Some(request_body()))
                .response("200", ok("Updated row", record()))
                .response("400", status("Field errors keyed by field name"))
                .response("404", status("No row with this id"))
                .build(),
        )
        .operation(
            PathItemType::Patch,
            operation(format!("Partially update a {}", R::MODEL))
                .parameter(id.clone())
                .request_body(Some(request_body()))
                .response("200", ok("Updated row", record()))
                .response("400", status("Field errors keyed by field name"))
                .response("404", status("No row with this id"))
                .build(),
        )
        .operation(
            PathItemType::Delete,
            operation(format!("Delete a {} and its dependents", R::MODEL))
                .parameter(id)
                .response("204", status("Deleted"))
                .response("404", status("No row with this id"))
                .build(),
        )
        .build();

    let paths = &mut openapi.paths.paths;
    paths.insert(format!("/api/{}", R::RESOURCE), collection);
    paths.insert(format!("/api/{}/{{id}}", R::RESOURCE), detail);
}

#[cfg(test)]
mod tests {
    use super::ApiDoc;
    use utoipa::OpenApi;

    #[test]
    fn document_covers_resource_and_admin_routes() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();

        for path in [
            "/api/health",
            "/api/customers",
            "/api/customers/{id}",
            "/api/action-rang-types/{id}",
            "/api/admin/login",
            "/api/admin/{resource}/{id}",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }

        let detail = &doc["paths"]["/api/stores/{id}"];
        for method in ["get", "put", "patch", "delete"] {
            assert!(detail.get(method).is_some(), "missing {method}");
        }
        assert_eq!(
            detail["get"]["responses"]["200"]["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/StoreSerializer"
        );
        assert!(doc["components"]["securitySchemes"]["bearer_auth"].is_object());
    }
}
