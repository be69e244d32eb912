use taskboard_core::db::open_db_in_memory;
use taskboard_core::{AuthService, Credentials, ServiceError, SqliteUserRepository, UserRepository};

fn credentials(username: &str, password: &str) -> Credentials {
    Credentials {
        username: username.to_string(),
        password: password.to_string(),
    }
}

#[test]
fn register_then_login_succeeds() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthService::new(SqliteUserRepository::try_new(&conn).unwrap());

    let registered = service.register(&credentials("alice", "pw1")).unwrap();
    let logged_in = service.login(&credentials("alice", "pw1")).unwrap();

    assert_eq!(registered.id, logged_in.id);
    assert_eq!(logged_in.username, "alice");
}

#[test]
fn duplicate_username_is_conflict() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthService::new(SqliteUserRepository::try_new(&conn).unwrap());

    service.register(&credentials("alice", "pw1")).unwrap();
    let err = service
        .register(&credentials("alice", "other"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));

    // The original password still works.
    service.login(&credentials("alice", "pw1")).unwrap();
}

#[test]
fn wrong_password_and_unknown_user_are_unauthorized() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthService::new(SqliteUserRepository::try_new(&conn).unwrap());

    service.register(&credentials("alice", "pw1")).unwrap();
    service.register(&credentials("bob", "pw2")).unwrap();

    assert!(matches!(
        service.login(&credentials("alice", "wrong")).unwrap_err(),
        ServiceError::Unauthorized
    ));
    assert!(matches!(
        service.login(&credentials("alice", "pw2")).unwrap_err(),
        ServiceError::Unauthorized
    ));
    assert!(matches!(
        service.login(&credentials("carol", "pw1")).unwrap_err(),
        ServiceError::Unauthorized
    ));
    service.login(&credentials("bob", "pw2")).unwrap();
}

#[test]
fn stored_password_is_never_plaintext() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();
    let service = AuthService::new(SqliteUserRepository::try_new(&conn).unwrap());

    service.register(&credentials("alice", "pw1")).unwrap();

    let stored = repo.find_by_username("alice").unwrap().unwrap();
    assert_ne!(stored.password_hash, "pw1");
    assert!(stored.password_hash.starts_with("$argon2id$"));

    let json = serde_json::to_value(&stored).unwrap();
    assert!(json.get("password_hash").is_none());
    assert_eq!(json["username"], "alice");
}

#[test]
fn repository_maps_unique_violation() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();

    repo.create_user("alice", "hash-a").unwrap();
    let err = repo.create_user("alice", "hash-b").unwrap_err();
    assert!(matches!(
        err,
        taskboard_core::RepoError::UniqueViolation("users.username")
    ));
}
