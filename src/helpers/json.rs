use actix_web::error::{Error, InternalError};
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use serde_derive::Serialize;

/// Envelope every endpoint answers with: `{success, message, id?, item?, list?}`.
#[derive(Debug, Serialize)]
pub struct JsonResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<T>>,
}

#[derive(Debug)]
pub struct JsonResponseBuilder<T>
where
    T: serde::Serialize,
{
    id: Option<i32>,
    item: Option<T>,
    list: Option<Vec<T>>,
}

impl<T> JsonResponseBuilder<T>
where
    T: serde::Serialize,
{
    pub fn set_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn set_item(mut self, item: T) -> Self {
        self.item = Some(item);
        self
    }

    pub fn set_list(mut self, list: Vec<T>) -> Self {
        self.list = Some(list);
        self
    }

    fn to_json_response(self, success: bool, message: String) -> JsonResponse<T> {
        JsonResponse {
            success,
            message,
            id: self.id,
            item: self.item,
            list: self.list,
        }
    }

    pub fn ok<M: Into<String>>(self, message: M) -> web::Json<JsonResponse<T>> {
        let message = non_empty(message.into(), "Success");
        web::Json(self.to_json_response(true, message))
    }

    fn error(self, status: StatusCode, message: String) -> Error {
        let body = self.to_json_response(false, message.clone());
        let response = HttpResponse::build(status).json(&body);

        InternalError::from_response(message, response).into()
    }

    /// Expected failure: not found, bad input, ownership mismatch, duplicates.
    /// Answered with HTTP 200 and `success: false`.
    pub fn fail<M: Into<String>>(self, message: M) -> Error {
        let message = non_empty(message.into(), "Request failed");
        self.error(StatusCode::OK, message)
    }

    pub fn not_found<M: Into<String>>(self, message: M) -> Error {
        let message = non_empty(message.into(), "Object not found");
        self.error(StatusCode::OK, message)
    }

    pub fn form_error<M: Into<String>>(self, message: M) -> Error {
        let message = non_empty(message.into(), "Validation error");
        self.error(StatusCode::OK, message)
    }

    pub fn bad_request<M: Into<String>>(self, message: M) -> Error {
        let message = non_empty(message.into(), "Bad request");
        self.error(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized<M: Into<String>>(self, message: M) -> Error {
        let message = non_empty(message.into(), "Unauthorized");
        self.error(StatusCode::UNAUTHORIZED, message)
    }

    pub fn internal_server_error<M: Into<String>>(self, message: M) -> Error {
        let message = non_empty(message.into(), "Internal Server Error");
        self.error(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl<T> JsonResponse<T>
where
    T: serde::Serialize,
{
    pub fn build() -> JsonResponseBuilder<T> {
        JsonResponseBuilder {
            id: None,
            item: None,
            list: None,
        }
    }
}

fn non_empty(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::ResponseError;

    #[test]
    fn ok_envelope_skips_empty_fields() {
        let web::Json(body) = JsonResponse::build().set_item(7).ok("");
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "Success");
        assert_eq!(value["item"], 7);
        assert!(value.get("list").is_none());
        assert!(value.get("id").is_none());
    }

    #[actix_web::test]
    async fn fail_is_http_200_with_success_false() {
        let err = JsonResponse::<()>::build().fail("Already in cart");
        let response = err.as_response_error().error_response();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["message"], "Already in cart");
    }

    #[actix_web::test]
    async fn internal_error_has_default_message() {
        let err = JsonResponse::<()>::build().internal_server_error("");
        let response = err.as_response_error().error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(response.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["message"], "Internal Server Error");
    }
}
