use crate::domain::entities::token::{Claims, JWT_ISSUER};
use crate::domain::entities::user::WarehouseUser;

fn user(role: &str, permissions: &[&str]) -> WarehouseUser {
    WarehouseUser {
        id: 3,
        username: "kho".to_string(),
        display_name: "Kho".to_string(),
        role: role.to_string(),
        permissions: permissions.iter().map(|p| p.to_string()).collect(),
    }
}

#[test]
fn test_claims_for_user() {
    let claims = Claims::for_user(&user("staff", &["sales:write"]), JWT_ISSUER, 86_400);
    assert_eq!(claims.user_id(), Some(3));
    assert_eq!(claims.exp - claims.iat, 86_400);
}

#[test]
fn test_claims_serialize_permissions() {
    let claims = Claims::for_user(&user("admin", &["inventory", "sales"]), JWT_ISSUER, 60);
    let json = serde_json::to_value(&claims).unwrap();
    assert_eq!(json["sub"], "3");
    assert_eq!(json["role"], "admin");
    assert_eq!(json["permissions"], serde_json::json!(["inventory", "sales"]));
    assert_eq!(json["iss"], JWT_ISSUER);
}
