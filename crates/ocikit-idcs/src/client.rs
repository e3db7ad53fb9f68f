//! IDCS SCIM API client
//!
//! Direct REST implementation against `/admin/v1` with a bearer token from
//! the OAuth2 client-credentials flow. Payloads follow the SCIM core and
//! IDCS extension schemas.

use crate::credentials::IdcsCredentials;
use crate::error::{IdcsError, Result};
use serde::Deserialize;
use serde_json::{Value, json};

const SCIM_CONTENT_TYPE: &str = "application/scim+json";
/// Page size for user/group listings. One page is enough for the tenancies
/// this tool targets.
const MAX_OBJECTS: u32 = 200;

/// IDCS REST client. One bearer token per construction, no refresh.
pub struct IdcsClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl IdcsClient {
    /// Exchange the stored client id/secret for a bearer token.
    pub async fn connect(credentials: &IdcsCredentials) -> Result<Self> {
        let client = reqwest::Client::new();
        let url = format!("{}/oauth2/v1/token", credentials.endpoint());

        tracing::debug!("Requesting OAuth2 token from {}", url);

        let response = client
            .post(&url)
            .header(
                "Content-Type",
                "application/x-www-form-urlencoded;charset=UTF-8",
            )
            .header("Authorization", format!("Basic {}", credentials.basic_auth))
            .body("grant_type=client_credentials&scope=urn:opc:idm:__myscopes__")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(IdcsError::TokenRequest(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| IdcsError::TokenRequest(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: credentials.endpoint(),
            token: token.access_token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    async fn dispatch(&self, request: reqwest::RequestBuilder, path: &str) -> Result<Value> {
        let response = request
            .header("Content-Type", SCIM_CONTENT_TYPE)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IdcsError::ApiError(format!("HTTP {} for {}", status, path)));
        }

        Ok(response.json().await?)
    }

    async fn get(&self, path: &str) -> Result<Value> {
        self.dispatch(self.client.get(self.url(path)), path).await
    }

    // ---- users

    pub async fn list_users(&self) -> Result<Vec<ScimUser>> {
        let path = format!("/admin/v1/Users?count={}", MAX_OBJECTS);
        let doc = self.get(&path).await?;
        let listing: ListResponse<ScimUser> = serde_json::from_value(doc)?;
        Ok(listing.resources)
    }

    /// Resolve a user name to its SCIM id.
    pub async fn user_id(&self, name: &str) -> Result<String> {
        self.list_users()
            .await?
            .into_iter()
            .find(|u| u.user_name == name)
            .map(|u| u.id)
            .ok_or_else(|| IdcsError::UserNotFound(name.to_string()))
    }

    /// Full SCIM document for one user.
    pub async fn show_user(&self, user_id: &str) -> Result<Value> {
        self.get(&format!("/admin/v1/Users/{}", user_id)).await
    }

    pub async fn create_user(
        &self,
        user_name: &str,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<Value> {
        let payload = create_user_payload(user_name, first_name, last_name, email);
        self.dispatch(
            self.client
                .post(self.url("/admin/v1/Users"))
                .body(payload.to_string()),
            "/admin/v1/Users",
        )
        .await
    }

    /// Activate or deactivate a user.
    pub async fn set_user_active(&self, user_id: &str, active: bool) -> Result<Value> {
        let path = format!("/admin/v1/UserStatusChanger/{}", user_id);
        self.dispatch(
            self.client
                .put(self.url(&path))
                .body(status_payload(active).to_string()),
            &path,
        )
        .await
    }

    pub async fn delete_user(&self, user_id: &str) -> Result<()> {
        let path = format!("/admin/v1/Users/{}?forceDelete=True", user_id);
        self.delete(&path).await
    }

    /// Display names of the groups a user belongs to. The attribute is
    /// absent entirely when the user has no groups.
    pub async fn user_groups(&self, user_id: &str) -> Result<Vec<String>> {
        let doc = self
            .get(&format!("/admin/v1/Users/{}?attributes=groups", user_id))
            .await?;
        Ok(member_displays(&doc, "groups", "display"))
    }

    // ---- groups

    pub async fn list_groups(&self) -> Result<Vec<ScimGroup>> {
        let path = format!("/admin/v1/Groups?count={}", MAX_OBJECTS);
        let doc = self.get(&path).await?;
        let listing: ListResponse<ScimGroup> = serde_json::from_value(doc)?;
        Ok(listing.resources)
    }

    /// Resolve a group display name to its SCIM id.
    pub async fn group_id(&self, name: &str) -> Result<String> {
        self.list_groups()
            .await?
            .into_iter()
            .find(|g| g.display_name == name)
            .map(|g| g.id)
            .ok_or_else(|| IdcsError::GroupNotFound(name.to_string()))
    }

    pub async fn show_group(&self, group_id: &str) -> Result<Value> {
        self.get(&format!("/admin/v1/Groups/{}", group_id)).await
    }

    pub async fn create_group(&self, name: &str, description: &str) -> Result<Value> {
        let payload = create_group_payload(name, description);
        self.dispatch(
            self.client
                .post(self.url("/admin/v1/Groups"))
                .body(payload.to_string()),
            "/admin/v1/Groups",
        )
        .await
    }

    pub async fn delete_group(&self, group_id: &str) -> Result<()> {
        let path = format!("/admin/v1/Groups/{}?forceDelete=True", group_id);
        self.delete(&path).await
    }

    /// User names of a group's members. The attribute is absent entirely
    /// when the group is empty.
    pub async fn group_members(&self, group_id: &str) -> Result<Vec<String>> {
        let doc = self
            .get(&format!("/admin/v1/Groups/{}?attributes=members", group_id))
            .await?;
        Ok(member_displays(&doc, "members", "name"))
    }

    pub async fn add_group_member(&self, group_id: &str, user_id: &str) -> Result<Value> {
        let path = format!("/admin/v1/Groups/{}", group_id);
        self.dispatch(
            self.client
                .patch(self.url(&path))
                .body(add_member_payload(user_id).to_string()),
            &path,
        )
        .await
    }

    pub async fn remove_group_member(&self, group_id: &str, user_id: &str) -> Result<Value> {
        let path = format!("/admin/v1/Groups/{}", group_id);
        self.dispatch(
            self.client
                .patch(self.url(&path))
                .body(remove_member_payload(user_id).to_string()),
            &path,
        )
        .await
    }

    /// DELETE expecting 204 No Content.
    async fn delete(&self, path: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(path))
            .header("Content-Type", SCIM_CONTENT_TYPE)
            .bearer_auth(&self.token)
            .send()
            .await?;

        if response.status() != reqwest::StatusCode::NO_CONTENT {
            return Err(IdcsError::ApiError(format!(
                "HTTP {} for {}",
                response.status(),
                path
            )));
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    #[serde(rename = "Resources", default = "Vec::new")]
    resources: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScimUser {
    pub id: String,
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub meta: Option<ScimMeta>,
    #[serde(rename = "idcsCreatedBy", default)]
    pub created_by: Option<ScimRef>,
}

impl ScimUser {
    pub fn created(&self) -> &str {
        self.meta
            .as_ref()
            .and_then(|m| m.created.as_deref())
            .unwrap_or("")
    }

    pub fn created_by_display(&self) -> &str {
        self.created_by
            .as_ref()
            .and_then(|c| c.display.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScimMeta {
    #[serde(default)]
    pub created: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScimRef {
    #[serde(default)]
    pub display: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScimGroup {
    pub id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

/// Pull `attr[].field` display strings out of a SCIM document.
fn member_displays(doc: &Value, attr: &str, field: &str) -> Vec<String> {
    doc.get(attr)
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|e| e.get(field).and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

// ---- SCIM payloads

fn create_user_payload(user_name: &str, first_name: &str, last_name: &str, email: &str) -> Value {
    json!({
        "schemas": ["urn:ietf:params:scim:schemas:core:2.0:User"],
        "userName": user_name,
        "name": {
            "familyName": last_name,
            "givenName": first_name
        },
        "emails": [{
            "value": email,
            "type": "work",
            "primary": true
        }]
    })
}

fn create_group_payload(name: &str, description: &str) -> Value {
    json!({
        "displayName": name,
        "urn:ietf:params:scim:schemas:oracle:idcs:extension:group:Group": {
            "creationMechanism": "api",
            "description": description
        },
        "schemas": [
            "urn:ietf:params:scim:schemas:core:2.0:Group",
            "urn:ietf:params:scim:schemas:oracle:idcs:extension:group:Group"
        ]
    })
}

fn status_payload(active: bool) -> Value {
    json!({
        "active": active,
        "schemas": ["urn:ietf:params:scim:schemas:oracle:idcs:UserStatusChanger"]
    })
}

fn add_member_payload(user_id: &str) -> Value {
    json!({
        "schemas": ["urn:ietf:params:scim:api:messages:2.0:PatchOp"],
        "Operations": [{
            "op": "add",
            "path": "members",
            "value": [{
                "value": user_id,
                "type": "User"
            }]
        }]
    })
}

fn remove_member_payload(user_id: &str) -> Value {
    json!({
        "schemas": ["urn:ietf:params:scim:api:messages:2.0:PatchOp"],
        "Operations": [{
            "op": "remove",
            "path": format!("members[value eq \"{}\"]", user_id)
        }]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_missing_resources() {
        let listing: ListResponse<ScimUser> =
            serde_json::from_value(json!({"totalResults": 0})).unwrap();
        assert!(listing.resources.is_empty());
    }

    #[test]
    fn test_scim_user_optional_fields() {
        let user: ScimUser = serde_json::from_value(json!({
            "id": "u-1",
            "userName": "alice",
            "active": true,
            "meta": {"created": "2020-01-08T09:00:00Z"},
            "idcsCreatedBy": {"display": "admin"}
        }))
        .unwrap();
        assert_eq!(user.created(), "2020-01-08T09:00:00Z");
        assert_eq!(user.created_by_display(), "admin");

        let bare: ScimUser =
            serde_json::from_value(json!({"id": "u-2", "userName": "bob"})).unwrap();
        assert!(!bare.active);
        assert_eq!(bare.created(), "");
        assert!(bare.title.is_none());
    }

    #[test]
    fn test_member_displays() {
        let doc = json!({
            "members": [
                {"value": "u-1", "name": "alice"},
                {"value": "u-2", "name": "bob"}
            ]
        });
        assert_eq!(member_displays(&doc, "members", "name"), vec!["alice", "bob"]);
        // Empty group: the attribute is simply absent.
        assert!(member_displays(&json!({}), "members", "name").is_empty());
    }

    #[test]
    fn test_create_user_payload_schema() {
        let payload = create_user_payload("alice", "Alice", "Liddell", "alice@example.com");
        assert_eq!(
            payload["schemas"][0],
            "urn:ietf:params:scim:schemas:core:2.0:User"
        );
        assert_eq!(payload["name"]["givenName"], "Alice");
        assert_eq!(payload["emails"][0]["primary"], true);
    }

    #[test]
    fn test_remove_member_payload_filter_path() {
        let payload = remove_member_payload("u-42");
        assert_eq!(
            payload["Operations"][0]["path"],
            "members[value eq \"u-42\"]"
        );
    }

    #[test]
    fn test_status_payload() {
        assert_eq!(status_payload(false)["active"], false);
        assert_eq!(
            status_payload(true)["schemas"][0],
            "urn:ietf:params:scim:schemas:oracle:idcs:UserStatusChanger"
        );
    }
}
