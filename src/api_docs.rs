use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::habits::list_habits,
        api::points::get_balance,
        api::badges::list_badges,
        // Add other endpoints here as we document them
    ),
    tags(
        (name = "habitude", description = "Habitude API")
    )
)]
pub struct ApiDoc;
