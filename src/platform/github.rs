//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::release::{
    heads_ref_prefix, join_release_prefix, matching_refs_path, strip_ref_prefix,
};
use crate::types::{MergeStatus, RepoConfig};
use async_trait::async_trait;
use octocrab::Octocrab;
use octocrab::params::repos::Reference;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

/// Public GitHub REST API root
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Page size for REST listings
const PAGE_SIZE: usize = 100;

// GraphQL response types for the release branch search

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct RefsData {
    repository: Option<RefsRepository>,
}

#[derive(Deserialize)]
struct RefsRepository {
    refs: Option<RefsConnection>,
}

#[derive(Deserialize)]
struct RefsConnection {
    nodes: Vec<RefNode>,
}

#[derive(Deserialize)]
struct RefNode {
    name: String,
}

#[derive(Deserialize)]
struct MatchingRef {
    #[serde(rename = "ref")]
    ref_name: String,
}

#[derive(Deserialize)]
struct ApiMessage {
    message: Option<String>,
}

const SEARCH_BRANCHES_QUERY: &str = r"
    query SearchReleaseBranches($owner: String!, $name: String!, $refPrefix: String!, $query: String, $first: Int!) {
        repository(owner: $owner, name: $name) {
            refs(refPrefix: $refPrefix, query: $query, first: $first, orderBy: { field: TAG_COMMIT_DATE, direction: DESC }) {
                nodes {
                    name
                }
            }
        }
    }
";

/// GitHub service using octocrab, with raw requests where status codes matter
pub struct GitHubService {
    client: Octocrab,
    config: RepoConfig,
    /// Token for raw HTTP requests
    token: String,
    /// HTTP client for raw requests (merges, matching refs)
    http_client: Client,
}

impl GitHubService {
    /// Create a new GitHub service
    pub fn new(token: &str, config: RepoConfig) -> Result<Self> {
        let api_url = config.api_url.trim_end_matches('/').to_string();
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        if api_url != DEFAULT_API_URL {
            builder = builder
                .base_uri(&api_url)
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent(concat!("release-automerge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: RepoConfig { api_url, ..config },
            token: token.to_string(),
            http_client,
        })
    }

    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{path}",
            self.config.api_url, self.config.owner, self.config.repo
        )
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }
}

/// Turn a non-success response into an API error carrying GitHub's message
async fn error_from_response(response: Response, action: &str) -> Error {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiMessage>(&body)
        .ok()
        .and_then(|m| m.message)
        .unwrap_or(body);
    Error::GitHubApi(format!("{action} failed ({status}): {message}"))
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn list_matching_branches(&self, release_prefix: &str) -> Result<Vec<String>> {
        let path: String = matching_refs_path(release_prefix)
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        let url = self.repo_url(&format!("git/matching-refs/{path}"));
        debug!(%url, "listing matching refs");

        let mut branches = Vec::new();
        let mut page = 1_u32;
        loop {
            let response = self
                .authorized(self.http_client.get(&url))
                .query(&[("per_page", PAGE_SIZE.to_string()), ("page", page.to_string())])
                .send()
                .await
                .map_err(|e| Error::GitHubApi(format!("Failed to list matching refs: {e}")))?;

            if !response.status().is_success() {
                return Err(error_from_response(response, "Listing matching refs").await);
            }

            let refs: Vec<MatchingRef> = response
                .json()
                .await
                .map_err(|e| Error::GitHubApi(format!("Failed to parse matching refs: {e}")))?;
            let count = refs.len();
            branches.extend(
                refs.iter()
                    .map(|r| strip_ref_prefix(&r.ref_name).trim().to_string()),
            );
            debug!(page, count, "fetched matching refs page");

            if count < PAGE_SIZE {
                break;
            }
            page += 1;
        }

        debug!(total = branches.len(), "listed matching refs");
        Ok(branches)
    }

    async fn search_branches(
        &self,
        release_prefix: &str,
        query: Option<&str>,
        first: u32,
    ) -> Result<Vec<String>> {
        let ref_prefix = heads_ref_prefix(release_prefix);
        debug!(%ref_prefix, ?query, first, "searching release branches");

        let response: GraphQlResponse<RefsData> = self
            .client
            .graphql(&serde_json::json!({
                "query": SEARCH_BRANCHES_QUERY,
                "variables": {
                    "owner": self.config.owner,
                    "name": self.config.repo,
                    "refPrefix": ref_prefix,
                    "query": query,
                    "first": first,
                }
            }))
            .await
            .map_err(|e| Error::GitHubApi(format!("GraphQL query failed: {e}")))?;

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
            return Err(Error::GitHubApi(format!(
                "GraphQL error: {}",
                messages.join(", ")
            )));
        }

        let data = response
            .data
            .ok_or_else(|| Error::GitHubApi("No data in GraphQL response".to_string()))?;
        let nodes = data
            .repository
            .and_then(|repo| repo.refs)
            .map(|refs| refs.nodes)
            .unwrap_or_default();

        let branches: Vec<String> = nodes
            .into_iter()
            .map(|node| join_release_prefix(release_prefix, &node.name))
            .collect();
        debug!(count = branches.len(), "found release branches");
        Ok(branches)
    }

    async fn merge_branch(&self, source: &str, target: &str) -> Result<MergeStatus> {
        debug!(source, target, "merging branch");
        let response = self
            .authorized(self.http_client.post(self.repo_url("merges")))
            .json(&serde_json::json!({ "base": target, "head": source }))
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to request merge: {e}")))?;

        let status = match response.status() {
            StatusCode::CREATED => MergeStatus::Merged,
            StatusCode::NO_CONTENT => MergeStatus::NothingToMerge,
            StatusCode::CONFLICT => MergeStatus::Conflict,
            other => {
                let body = response.text().await.unwrap_or_default();
                return Err(Error::MergeFailed {
                    status: other.as_u16(),
                    body,
                });
            }
        };

        debug!(source, target, %status, "merge answered");
        Ok(status)
    }

    async fn active_pr_exists(&self, target: &str, source: &str) -> Result<bool> {
        debug!(target, source, "checking for open PR");
        let head = format!("{}:{}", &self.config.owner, source);

        let prs = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .list()
            .state(octocrab::params::State::Open)
            .head(head)
            .base(target)
            .per_page(1)
            .send()
            .await?;

        let exists = !prs.items.is_empty();
        debug!(exists, "open PR lookup complete");
        Ok(exists)
    }

    async fn create_pr(&self, target: &str, source: &str) -> Result<u64> {
        debug!(target, source, "creating PR");
        let title = format!("Merge release branch {source} to the release branch {target}");

        let pr = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .create(title, source, target)
            .draft(false)
            .maintainer_can_modify(true)
            .send()
            .await?;

        debug!(pr_number = pr.number, "created PR");
        Ok(pr.number)
    }

    async fn add_label(&self, pr_number: u64, label: &str) -> Result<()> {
        debug!(pr_number, label, "adding label");
        self.client
            .issues(&self.config.owner, &self.config.repo)
            .add_labels(pr_number, &[label.to_string()])
            .await?;
        Ok(())
    }

    async fn create_branch(&self, name: &str, sha: &str) -> Result<String> {
        debug!(name, sha, "creating branch");
        let created = self
            .client
            .repos(&self.config.owner, &self.config.repo)
            .create_ref(&Reference::Branch(name.to_string()), sha)
            .await?;

        let branch = strip_ref_prefix(&created.ref_field).trim().to_string();
        debug!(%branch, "created branch");
        Ok(branch)
    }

    fn repo(&self) -> &RepoConfig {
        &self.config
    }
}
