use serde::Deserialize;

use crate::{
    error::{ApiResult, ValidationErrors},
    validation::check_text,
};

pub const RATING_MIN: i16 = 1;
pub const RATING_MAX: i16 = 5;

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub content: String,
    #[serde(default)]
    pub rating: Option<i16>,
}

impl CommentRequest {
    pub fn normalized(mut self) -> ApiResult<Self> {
        self.content = self.content.trim().to_string();

        let mut errors = ValidationErrors::new();
        check_text(&mut errors, "content", "Comment", &self.content, 3, None);
        if let Some(rating) = self.rating {
            if !(RATING_MIN..=RATING_MAX).contains(&rating) {
                errors.add("rating", "Rating must be between 1 and 5.");
            }
        }
        errors.into_result()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    #[test]
    fn rating_outside_range_is_rejected() {
        for rating in [0, 6, -1] {
            let req = CommentRequest {
                content: "Very tasty".into(),
                rating: Some(rating),
            };
            match req.normalized() {
                Err(ApiError::Validation(fields)) => {
                    assert_eq!(
                        fields.get("rating").unwrap()[0],
                        "Rating must be between 1 and 5."
                    );
                }
                other => panic!("rating {rating}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn rating_is_optional() {
        let req = CommentRequest {
            content: "  Nice one ".into(),
            rating: None,
        }
        .normalized()
        .expect("valid");
        assert_eq!(req.content, "Nice one");

        let body: CommentRequest = serde_json::from_str(r#"{"content":"Good stuff"}"#).unwrap();
        assert!(body.rating.is_none());
    }

    #[test]
    fn short_content_is_rejected() {
        let req = CommentRequest {
            content: "ok".into(),
            rating: Some(4),
        };
        match req.normalized() {
            Err(ApiError::Validation(fields)) => {
                assert_eq!(fields.get("content").unwrap()[0], "Comment is too short.");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
