use blog_api::models::{
    CategoryDto, CommentDto, JwtAuthResponse, LoginDto, PostDto, PostResponse, RegisterDto, Role,
};
use serde_json::json;
use validator::Validate;

// --- Constraint Tests ---

fn valid_post() -> PostDto {
    PostDto {
        title: "Ok".to_string(),
        description: "0123456789".to_string(),
        content: "x".to_string(),
        ..Default::default()
    }
}

#[test]
fn test_post_constraints_at_boundaries() {
    assert!(valid_post().validate().is_ok());

    let short_title = PostDto { title: "O".into(), ..valid_post() };
    let errors = short_title.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("title"));

    let short_description = PostDto { description: "012345678".into(), ..valid_post() };
    let errors = short_description.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("description"));

    let empty_content = PostDto { content: String::new(), ..valid_post() };
    let errors = empty_content.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("content"));
}

#[test]
fn test_comment_constraints() {
    let valid = CommentDto {
        name: "Ann".into(),
        email: "ann@example.com".into(),
        body: "0123456789".into(),
        ..Default::default()
    };
    assert!(valid.validate().is_ok());

    let invalid = CommentDto {
        name: String::new(),
        email: "not-an-email".into(),
        body: "too short".into(),
        ..Default::default()
    };
    let errors = invalid.validate().unwrap_err();
    let fields = errors.field_errors();
    assert!(fields.contains_key("name"));
    assert!(fields.contains_key("email"));
    assert!(fields.contains_key("body"));
}

#[test]
fn test_category_requires_name() {
    assert!(CategoryDto::default().validate().is_err());
    let named = CategoryDto { name: "News".into(), ..Default::default() };
    assert!(named.validate().is_ok());
}

#[test]
fn test_register_constraints() {
    let dto = RegisterDto {
        name: "Jo".into(),
        username: "jo".into(),
        email: "jo@example.com".into(),
        password: "short".into(),
    };
    let errors = dto.validate().unwrap_err();
    let fields = errors.field_errors();
    assert!(fields.contains_key("username"));
    assert!(fields.contains_key("password"));
    assert!(!fields.contains_key("email"));
}

#[test]
fn test_missing_fields_reach_validation() {
    let post: PostDto =
        serde_json::from_value(json!({ "title": "Hi", "description": "short" })).unwrap();
    let errors = post.validate().unwrap_err();
    let fields = errors.field_errors();
    assert!(fields.contains_key("description"));
    assert!(fields.contains_key("content"));
    assert!(!fields.contains_key("title"));

    let comment: CommentDto = serde_json::from_value(json!({})).unwrap();
    let errors = comment.validate().unwrap_err();
    assert_eq!(errors.field_errors().len(), 3);

    let category: CategoryDto = serde_json::from_value(json!({ "description": "x" })).unwrap();
    assert!(category.validate().is_err());
}

// --- JSON Shape Tests ---

#[test]
fn test_post_dto_uses_camel_case_and_optional_fields() {
    // id, comments and categoryId may be omitted on input.
    let parsed: PostDto = serde_json::from_value(json!({
        "title": "Title",
        "description": "Long description",
        "content": "Body"
    }))
    .unwrap();
    assert_eq!(parsed.id, 0);
    assert!(parsed.comments.is_empty());
    assert_eq!(parsed.category_id, None);

    let value = serde_json::to_value(PostDto { category_id: Some(3), ..valid_post() }).unwrap();
    assert_eq!(value["categoryId"], 3);
    assert!(value.get("category_id").is_none());
    assert!(value["comments"].is_array());
}

#[test]
fn test_post_response_field_names() {
    let value = serde_json::to_value(PostResponse {
        content: vec![],
        page_no: 1,
        page_size: 5,
        total_elements: 6,
        total_pages: 2,
        last: true,
    })
    .unwrap();

    for key in ["content", "pageNo", "pageSize", "totalElements", "totalPages", "last"] {
        assert!(value.get(key).is_some(), "missing {}", key);
    }
}

#[test]
fn test_auth_payload_field_names() {
    let login: LoginDto = serde_json::from_value(json!({
        "usernameOrEmail": "admin",
        "password": "secret"
    }))
    .unwrap();
    assert_eq!(login.username_or_email, "admin");

    let token = serde_json::to_value(JwtAuthResponse::bearer("abc".into())).unwrap();
    assert_eq!(token, json!({ "accessToken": "abc", "tokenType": "Bearer" }));
}

#[test]
fn test_role_parsing_never_escalates() {
    assert_eq!(Role::parse("ADMIN"), Role::Admin);
    assert_eq!(Role::parse("ROLE_ADMIN"), Role::Admin);
    assert_eq!(Role::parse("admin"), Role::Admin);
    assert_eq!(Role::parse("USER"), Role::User);
    assert_eq!(Role::parse("superuser"), Role::User);
}
