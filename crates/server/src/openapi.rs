use utoipa::{IntoParams, OpenApi, ToSchema};

// Schema-only mirrors of the wire types; decimals travel as strings.

#[derive(ToSchema)]
pub struct AdvertisementDoc {
    pub id: i32,
    pub title: String,
    pub description: String,
    #[schema(example = "150.00")]
    pub price: String,
    pub author: String,
    #[schema(format = DateTime)]
    pub created_at: String,
}

#[derive(ToSchema)]
pub struct NewAdvertisementDoc {
    pub title: String,
    pub description: String,
    #[schema(example = "150.00")]
    pub price: String,
    pub author: String,
}

#[derive(ToSchema)]
pub struct AdvertisementPatchDoc {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub author: Option<String>,
}

#[derive(ToSchema)]
pub struct FieldErrorDoc {
    pub field: String,
    pub message: String,
}

#[derive(ToSchema)]
pub struct ErrorDoc {
    pub error: String,
    pub detail: Option<String>,
    pub fields: Option<Vec<FieldErrorDoc>>,
}

#[derive(ToSchema)]
pub struct MessageDoc {
    pub message: String,
}

/// Query parameters of `GET /advertisement`.
#[derive(IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// case-insensitive substring
    pub title: Option<String>,
    /// case-insensitive substring
    pub description: Option<String>,
    /// case-insensitive substring
    pub author: Option<String>,
    /// inclusive lower bound
    pub min_price: Option<String>,
    /// inclusive upper bound
    pub max_price: Option<String>,
    /// rows to skip, default 0
    pub skip: Option<i64>,
    /// 0..=100, default 100
    pub limit: Option<i64>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::root,
        crate::routes::health,
        crate::routes::advertisements::create,
        crate::routes::advertisements::get,
        crate::routes::advertisements::update,
        crate::routes::advertisements::delete,
        crate::routes::advertisements::search,
    ),
    components(
        schemas(
            AdvertisementDoc,
            NewAdvertisementDoc,
            AdvertisementPatchDoc,
            FieldErrorDoc,
            ErrorDoc,
            MessageDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "advertisement")
    )
)]
pub struct ApiDoc;
