//! Mock registry data
//!
//! Fills a fresh store with generated servers so the API has something to
//! serve before anyone publishes. Each name gets 2-5 versions with spread
//! publish dates and exactly one latest flag, mirroring what the publish
//! path would have produced.

use chrono::{Duration, TimeZone, Utc};
use rand::Rng;
use serde_json::json;
use tracing::info;

use crate::domain::{
    Icon, Package, Repository, ServerDetail, ServerResponse, Transport, PUBLISHER_META_KEY,
};
use crate::identifier::server_id_for;
use crate::store::RegistryStore;

const NAMESPACE: &str = "io.modelcontextprotocol";

const SHORT_NAMES: &[&str] = &[
    "filesystem",
    "database",
    "web-scraper",
    "email",
    "calendar",
    "slack",
    "github",
    "jira",
    "notion",
    "trello",
    "discord",
    "telegram",
    "youtube",
    "spotify",
    "aws-s3",
    "gcp-storage",
    "azure-blob",
    "mongodb",
    "postgresql",
    "mysql",
    "redis",
    "elasticsearch",
    "kafka",
    "rabbitmq",
    "docker",
    "kubernetes",
    "terraform",
    "ansible",
    "jenkins",
    "gitlab",
    "confluence",
    "dropbox",
    "google-drive",
    "figma",
    "salesforce",
    "zendesk",
    "stripe",
    "paypal",
    "quickbooks",
    "weather-api",
    "maps",
    "translation",
    "ocr",
    "speech-to-text",
    "text-to-speech",
    "wikipedia",
    "arxiv",
    "todoist",
    "asana",
    "linear",
];

const DESCRIPTIONS: &[&str] = &[
    "A powerful server for managing and processing data efficiently",
    "Seamless integration with popular productivity tools and workflows",
    "Advanced automation capabilities for streamlined operations",
    "Real-time data synchronization and collaboration features",
    "Secure and scalable solution for enterprise environments",
    "User-friendly interface with comprehensive API support",
    "High-performance processing with minimal resource usage",
    "Cross-platform compatibility with extensive plugin ecosystem",
    "AI-powered insights and intelligent data processing",
    "Robust security features with enterprise-grade encryption",
];

/// Populate `store` with `count` generated servers (names repeat with a
/// numeric suffix once the base list is exhausted).
pub fn seed_registry(store: &RegistryStore, count: usize) {
    let mut rng = rand::thread_rng();
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    for index in 0..count {
        let short_name = SHORT_NAMES[index % SHORT_NAMES.len()];
        let suffix = if index >= SHORT_NAMES.len() {
            format!("-{}", index / SHORT_NAMES.len())
        } else {
            String::new()
        };
        let full_name = format!("{NAMESPACE}/{short_name}{suffix}");

        if store.versions(&full_name).is_some() {
            continue;
        }

        let description = DESCRIPTIONS[rng.gen_range(0..DESCRIPTIONS.len())];
        let num_versions = rng.gen_range(2..=5);

        let mut versions: Vec<ServerResponse> = Vec::with_capacity(num_versions);
        for v in 0..num_versions {
            let version = format!("{}.{}.{}", v + 1, rng.gen_range(0..5), rng.gen_range(0..10));
            let published = base + Duration::days(rng.gen_range(0..300) + (v as i64) * 30);
            let updated = published + Duration::days(rng.gen_range(0..10));

            let title = short_name
                .split('-')
                .map(|w| {
                    let mut chars = w.chars();
                    match chars.next() {
                        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                        None => String::new(),
                    }
                })
                .collect::<Vec<_>>()
                .join(" ");

            let server = ServerDetail {
                name: full_name.clone(),
                description: format!("{description} - {short_name} integration for MCP."),
                version: version.clone(),
                title: Some(title),
                repository: Some(Repository {
                    url: "https://github.com/modelcontextprotocol/servers".to_string(),
                    source: "github".to_string(),
                    id: Some(server_id_for(&format!("repo-{full_name}")).to_string()),
                    subfolder: (index % 3 == 0).then(|| format!("src/{short_name}")),
                }),
                website_url: (index % 2 == 0)
                    .then(|| format!("https://modelcontextprotocol.io/{short_name}")),
                icons: (index % 3 == 0).then(|| {
                    vec![Icon {
                        src: format!("https://example.com/icons/{short_name}.png"),
                        mime_type: Some("image/png".to_string()),
                        sizes: Some(vec!["48x48".to_string(), "96x96".to_string()]),
                        theme: None,
                    }]
                }),
                schema: Some(
                    "https://static.modelcontextprotocol.io/schemas/2025-10-17/server.schema.json"
                        .to_string(),
                ),
                packages: Some(vec![Package {
                    registry_type: "npm".to_string(),
                    registry_base_url: Some("https://registry.npmjs.org".to_string()),
                    identifier: format!("@modelcontextprotocol/server-{short_name}"),
                    version: Some(version),
                    file_sha256: None,
                    runtime_hint: None,
                    transport: Transport::Stdio,
                    runtime_arguments: None,
                    package_arguments: None,
                    environment_variables: None,
                }]),
                remotes: (index % 2 == 0).then(|| {
                    vec![Transport::Sse {
                        url: format!("https://api.{short_name}.example.com/sse"),
                        headers: None,
                    }]
                }),
                meta: json!({
                    (PUBLISHER_META_KEY): {
                        "tool": "publisher-cli",
                        "version": "1.2.3",
                        "buildInfo": {
                            "commit": "abc123def456",
                            "timestamp": updated.to_rfc3339(),
                        }
                    }
                })
                .as_object()
                .cloned(),
            };

            let mut envelope = ServerResponse::published_at(server, published);
            envelope.meta.official.updated_at = updated;
            envelope.meta.official.is_latest = false;
            versions.push(envelope);
        }

        // Newest publish date wins the latest flag, exactly as the publish
        // path would have left the group.
        versions.sort_by(|a, b| b.published().cmp(&a.published()));
        if let Some(newest) = versions.first_mut() {
            newest.meta.official.is_latest = true;
        }

        for envelope in versions {
            store.upsert_version(envelope);
        }
    }

    info!(names = store.len(), "seeded registry store");
}
