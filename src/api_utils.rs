use axum::http::StatusCode;

pub fn to_http500<E>(err: E) -> (StatusCode, String)
where
    E: std::error::Error,
{
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

// for domain-level rejections the client can act on, e.g. insufficient funds
pub fn to_http422<E>(err: E) -> (StatusCode, String)
where
    E: std::error::Error,
{
    (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
}
