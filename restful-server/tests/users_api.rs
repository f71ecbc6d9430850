mod common;

use actix_web::http::StatusCode;
use actix_web::{test, App};
use common::{bearer, seed_user, services, InMemoryDb};
use serde_json::Value;

macro_rules! app {
    ($db:expr) => {{
        let services = services(&$db);
        test::init_service(App::new().configure(|cfg| services.configure(cfg))).await
    }};
}

#[actix_rt::test]
async fn home_welcomes() {
    let db = InMemoryDb::new();
    let app = app!(db);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, "Welcome to this API");
}

#[actix_rt::test]
async fn create_user_returns_created_user_without_password() {
    let db = InMemoryDb::new();
    let app = app!(db);

    let req = test::TestRequest::post()
        .uri("/users")
        .set_form([
            ("username", "john"),
            ("email", "john@gmail.com"),
            ("password", "password"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp
        .headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["username"], "john");
    assert_eq!(body["email"], "john@gmail.com");
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
    assert_eq!(location, Some(format!("/users/{}", body["id"])));
}

#[actix_rt::test]
async fn create_user_reports_first_problem() {
    let db = InMemoryDb::new();
    seed_user(&db, "john", "john@gmail.com").await;
    let app = app!(db);

    let cases = [
        ("cena", "john@gmail.com", "password", 409, "Email Already Taken"),
        ("john", "cena@gmail.com", "password", 409, "Username Already Taken"),
        ("doe", "cena.com", "password", 422, "Invalid Email"),
        ("", "a@b.com", "x", 422, "Required Username"),
        ("cena", "", "password", 422, "Required Email"),
        ("doe", "cena@gmail.com", "", 422, "Required Password"),
    ];

    for (username, email, password, status, message) in cases {
        let req = test::TestRequest::post()
            .uri("/users")
            .set_form([
                ("username", username),
                ("email", email),
                ("password", password),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status().as_u16(), status, "case {username}/{email}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], message);
    }
}

#[actix_rt::test]
async fn missing_form_fields_count_as_empty() {
    let db = InMemoryDb::new();
    let app = app!(db);

    let req = test::TestRequest::post()
        .uri("/users")
        .set_form([("email", "a@b.com")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Required Username");
}

#[actix_rt::test]
async fn list_users_returns_all_seeded() {
    let db = InMemoryDb::new();
    seed_user(&db, "john", "john@gmail.com").await;
    seed_user(&db, "doe", "doe@gmail.com").await;
    let app = app!(db);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/users").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let users = body.as_array().expect("array of users");
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["username"], "john");
}

#[actix_rt::test]
async fn list_users_honours_paging() {
    let db = InMemoryDb::new();
    seed_user(&db, "john", "john@gmail.com").await;
    seed_user(&db, "doe", "doe@gmail.com").await;
    let app = app!(db);

    let req = test::TestRequest::get()
        .uri("/users?limit=1&offset=1")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["username"], "doe");

    let req = test::TestRequest::get().uri("/users?limit=500").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let req = test::TestRequest::get().uri("/users?limit=abc").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid query");
}

#[actix_rt::test]
async fn get_user_by_id() {
    let db = InMemoryDb::new();
    let user = seed_user(&db, "john", "john@gmail.com").await;
    let app = app!(db);

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}", user.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["username"], "john");
    assert_eq!(body["email"], "john@gmail.com");

    let req = test::TestRequest::get().uri("/users/unknwon").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid identifier");

    let req = test::TestRequest::get().uri("/users/9999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn update_user_cases() {
    let db = InMemoryDb::new();
    let john = seed_user(&db, "john", "john@gmail.com").await;
    let doe = seed_user(&db, "doe", "doe@gmail.com").await;
    let app = app!(db);

    let token = bearer(john.id);
    let token = token.as_str();
    let own = john.id.to_string();
    let own = own.as_str();
    let other = doe.id.to_string();

    // (id, username, email, password, authorization, status, error)
    let cases: [(&str, &str, &str, &str, &str, u16, Option<&str>); 10] = [
        (own, "Grand", "grand@gmail.com", "password", token, 200, None),
        (own, "Woman", "woman@gmail.com", "", token, 422, Some("Required Password")),
        (own, "Man", "man@gmail.com", "password", "", 401, Some("Unauthorized")),
        (own, "Woman", "woman@gmail.com", "password", "This is incorrect token", 401, Some("Unauthorized")),
        (own, "Frank", "doe@gmail.com", "password", token, 409, Some("Email Already Taken")),
        (own, "doe", "kenny@gmail.com", "password", token, 409, Some("Username Already Taken")),
        (own, "kan", "kan.com", "password", token, 422, Some("Invalid Email")),
        (own, "", "kan@gmail.com", "password", token, 422, Some("Required Username")),
        ("unknwon", "kan", "kan@gmail.com", "password", token, 400, None),
        // another user's id is refused even with an invalid payload
        (other.as_str(), "", "", "", token, 401, Some("Unauthorized")),
    ];

    for (id, username, email, password, authorization, status, error) in cases {
        let mut req = test::TestRequest::put().uri(&format!("/users/{id}")).set_form([
            ("username", username),
            ("email", email),
            ("password", password),
        ]);
        if !authorization.is_empty() {
            req = req.insert_header(("Authorization", authorization));
        }
        let resp = test::call_service(&app, req.to_request()).await;

        assert_eq!(resp.status().as_u16(), status, "case {id}/{username}/{email}");
        let body: Value = test::read_body_json(resp).await;
        if status == 200 {
            assert_eq!(body["username"], username);
            assert_eq!(body["email"], email);
        }
        if let Some(error) = error {
            assert_eq!(body["error"], error);
        }
    }
}

#[actix_rt::test]
async fn update_user_checks_token_before_body() {
    let db = InMemoryDb::new();
    let john = seed_user(&db, "john", "john@gmail.com").await;
    let doe = seed_user(&db, "doe", "doe@gmail.com").await;
    let app = app!(db);

    let json_update = |authorization: String| {
        test::TestRequest::put()
            .uri(&format!("/users/{}", john.id))
            .insert_header(("Authorization", authorization))
            .set_json(serde_json::json!({ "username": "x", "email": "x@gmail.com", "password": "p" }))
            .to_request()
    };

    let resp = test::call_service(&app, json_update(bearer(doe.id))).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Unauthorized");

    let resp = test::call_service(&app, json_update(bearer(john.id))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid form body");
}

#[actix_rt::test]
async fn updated_password_is_usable_for_login() {
    let db = InMemoryDb::new();
    let john = seed_user(&db, "john", "john@gmail.com").await;
    let app = app!(db);

    let req = test::TestRequest::put()
        .uri(&format!("/users/{}", john.id))
        .insert_header(("Authorization", bearer(john.id)))
        .set_form([
            ("username", "john"),
            ("email", "john@gmail.com"),
            ("password", "new-secret"),
        ])
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let login = |password: &'static str| {
        test::TestRequest::post()
            .uri("/login")
            .set_form([("email", "john@gmail.com"), ("password", password)])
            .to_request()
    };
    assert_eq!(
        test::call_service(&app, login("new-secret")).await.status(),
        StatusCode::OK
    );
    assert_eq!(
        test::call_service(&app, login("password")).await.status(),
        StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[actix_rt::test]
async fn delete_user_cases() {
    let db = InMemoryDb::new();
    let john = seed_user(&db, "john", "john@gmail.com").await;
    let doe = seed_user(&db, "doe", "doe@gmail.com").await;
    let app = app!(db);
    let token = bearer(john.id);

    let delete = |id: String, authorization: Option<&str>| {
        let mut req = test::TestRequest::delete().uri(&format!("/users/{id}"));
        if let Some(authorization) = authorization {
            req = req.insert_header(("Authorization", authorization.to_string()));
        }
        req.to_request()
    };

    let resp = test::call_service(&app, delete(john.id.to_string(), None)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Unauthorized");

    let resp = test::call_service(
        &app,
        delete(john.id.to_string(), Some("This is an incorrect token")),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(&app, delete("unknwon".to_string(), Some(token.as_str()))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(&app, delete(doe.id.to_string(), Some(token.as_str()))).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(&app, delete(john.id.to_string(), Some(token.as_str()))).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        resp.headers().get("Entity").and_then(|v| v.to_str().ok()),
        Some(john.id.to_string().as_str())
    );

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}", john.id))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}
