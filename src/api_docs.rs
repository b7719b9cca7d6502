use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::book_instance::list_book_instances,
        api::book_instance::get_book_instance,
        api::book_instance::create_book_instance,
        api::book_instance::delete_book_instance,
        api::book_instance::update_book_instance,
    ),
    components(
        schemas(
            api::book_instance::BookInstanceForm,
            api::book_instance::DeleteBookInstanceForm,
        )
    ),
    tags(
        (name = "locallibrary", description = "Local library catalog")
    )
)]
pub struct ApiDoc;
