//! Common test utilities for msgraph-provider-entra integration tests.

#![allow(dead_code)]

use msgraph_provider_entra::{Client, EntraConfig, EntraConfigBuilder, EntraCredentials};
use secrecy::SecretString;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TENANT_ID: &str = "contoso-tenant";

/// Test data factory for a security group.
pub fn create_test_group(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "displayName": name,
        "description": format!("Test group: {}", name),
        "securityEnabled": true,
        "mailEnabled": false,
        "groupTypes": [],
        "createdDateTime": "2022-01-10T08:30:00Z"
    })
}

/// Test data factory for a Microsoft 365 group backed by a team.
pub fn create_team_group(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "displayName": name,
        "mailEnabled": true,
        "securityEnabled": false,
        "groupTypes": ["Unified"],
        "team": {
            "id": id,
            "displayName": name,
            "isArchived": false,
            "visibility": "private",
            "webUrl": format!("https://teams.microsoft.com/l/team/{}", id),
            "memberSettings": {"allowCreatePrivateChannels": true},
            "installedApps": [
                {
                    "id": format!("{}-app-1", id),
                    "teamsApp": {
                        "id": "com.microsoft.teamspace.tab.planner",
                        "displayName": "Tasks by Planner and To Do",
                        "distributionMethod": "store",
                        "appDefinitions": [
                            {
                                "id": "def-1",
                                "displayName": "Planner",
                                "version": "0.0.19",
                                "publishingState": "published",
                                "createdBy": {"user": {"id": "u-1", "displayName": "Megan Bowen"}}
                            },
                            {"id": "def-2", "displayName": "Planner", "version": "0.0.20"}
                        ]
                    }
                }
            ],
            "members": [
                {"id": "tm-1", "displayName": "Megan Bowen", "roles": ["owner"]},
                {"id": "tm-2", "displayName": "Alex Wilber", "roles": []}
            ]
        }
    })
}

/// Test data factory for a directory user reference.
pub fn create_directory_user(id: &str) -> Value {
    json!({
        "@odata.type": "#microsoft.graph.user",
        "id": id,
        "userPrincipalName": format!("{}@contoso.onmicrosoft.com", id)
    })
}

/// Wraps items in an OData response format.
pub fn create_odata_response(items: Vec<Value>, next_link: Option<&str>) -> Value {
    let mut response = json!({ "value": items });
    if let Some(link) = next_link {
        response["@odata.nextLink"] = json!(link);
    }
    response
}

/// Creates an OData error response.
pub fn create_odata_error(code: &str, message: &str) -> Value {
    json!({
        "error": {
            "code": code,
            "message": message
        }
    })
}

/// Creates a mock OAuth token response.
pub fn create_token_response(access_token: &str, expires_in: u64) -> Value {
    json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "expires_in": expires_in
    })
}

pub fn test_credentials() -> EntraCredentials {
    EntraCredentials {
        client_id: "test-client-id".to_string(),
        client_secret: SecretString::from("test-client-secret".to_string()),
    }
}

/// Mock server standing in for both the authority and Graph hosts.
pub struct MockGraphServer {
    pub server: MockServer,
}

impl MockGraphServer {
    /// Creates a new mock Graph API server.
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Returns the mock server's base URL.
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Config builder pointing every endpoint at this server.
    pub fn config_builder(&self) -> EntraConfigBuilder {
        EntraConfig::builder()
            .tenant_id(TENANT_ID)
            .authority_host(self.url())
            .graph_host(self.url())
    }

    /// Client configured against this server with default query options.
    pub fn client(&self) -> Client {
        let config = self.config_builder().build().unwrap();
        Client::configure(&config, test_credentials()).unwrap()
    }

    /// Sets up the OAuth token endpoint.
    pub async fn mock_token_endpoint(&self) {
        Mock::given(method("POST"))
            .and(path(format!("/{}/oauth2/v2.0/token", TENANT_ID)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(create_token_response("mock-access-token", 3600)),
            )
            .mount(&self.server)
            .await;
    }

    /// Continuation link of page `page` (1-based past the first).
    pub fn next_link(&self, page: usize) -> String {
        format!("{}/v1.0/groups?$skiptoken=page{}", self.url(), page)
    }

    /// Sets up the groups list split into the given pages.
    ///
    /// The first page answers the initial `$top` query; later pages answer
    /// their `$skiptoken` continuation links.
    pub async fn mock_groups_pages(&self, pages: Vec<Vec<Value>>) {
        let total_pages = pages.len();

        for (i, page) in pages.into_iter().enumerate() {
            let next_link = (i + 1 < total_pages).then(|| self.next_link(i + 1));
            let response = create_odata_response(page, next_link.as_deref());

            if i == 0 {
                Mock::given(method("GET"))
                    .and(path("/v1.0/groups"))
                    .and(query_param("$top", "100"))
                    .respond_with(ResponseTemplate::new(200).set_body_json(response))
                    .expect(1)
                    .mount(&self.server)
                    .await;
            } else {
                Mock::given(method("GET"))
                    .and(path("/v1.0/groups"))
                    .and(query_param("$skiptoken", format!("page{}", i)))
                    .respond_with(ResponseTemplate::new(200).set_body_json(response))
                    .expect(1)
                    .mount(&self.server)
                    .await;
            }
        }
    }

    /// Sets up a continuation page that fails with an OData error.
    pub async fn mock_groups_page_error(&self, page: usize, status: u16, code: &str) {
        Mock::given(method("GET"))
            .and(path("/v1.0/groups"))
            .and(query_param("$skiptoken", format!("page{}", page)))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_json(create_odata_error(code, "Insufficient privileges")),
            )
            .mount(&self.server)
            .await;
    }
}
