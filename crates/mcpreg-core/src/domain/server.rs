//! Published server record shapes (v0.1 canonical format)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Source repository reference for a server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Repository {
    /// Repository URL
    pub url: String,

    /// Hosting source (e.g., "github")
    pub source: String,

    /// Stable repository identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Subfolder within the repository containing the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subfolder: Option<String>,
}

/// Value format for a user-supplied input
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    String,
    Number,
    Boolean,
    Filepath,
}

/// A configurable input value (argument, header, or environment variable)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_required: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<InputFormat>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_secret: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,

    /// Named sub-inputs referenced by `{variable}` placeholders in `value`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<BTreeMap<String, Input>>,
}

/// Command-line argument passed to a package runtime
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Argument {
    /// Positional argument identified by position, not name
    #[serde(rename_all = "camelCase")]
    Positional {
        #[serde(skip_serializing_if = "Option::is_none")]
        value_hint: Option<String>,

        #[serde(skip_serializing_if = "Option::is_none")]
        is_repeated: Option<bool>,

        #[serde(flatten)]
        input: Input,
    },
    /// Named argument (flag) with an explicit name
    #[serde(rename_all = "camelCase")]
    Named {
        name: String,

        #[serde(skip_serializing_if = "Option::is_none")]
        is_repeated: Option<bool>,

        #[serde(flatten)]
        input: Input,
    },
}

/// Named input used for headers and environment variables
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyValueInput {
    pub name: String,

    #[serde(flatten)]
    pub input: Input,
}

/// Transport configuration for connecting to a server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Transport {
    /// Local process via stdio
    Stdio,
    /// Remote server via Streamable HTTP (MCP spec)
    StreamableHttp {
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        headers: Option<Vec<KeyValueInput>>,
    },
    /// Remote server via legacy SSE
    Sse {
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        headers: Option<Vec<KeyValueInput>>,
    },
}

/// An installable package distribution of a server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    /// Package registry kind (e.g., "npm", "pypi", "oci")
    pub registry_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_base_url: Option<String>,

    /// Package identifier within its registry
    pub identifier: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_sha256: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_hint: Option<String>,

    /// How to reach the server once the package is running
    pub transport: Transport,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_arguments: Option<Vec<Argument>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_arguments: Option<Vec<Argument>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_variables: Option<Vec<KeyValueInput>>,
}

/// Icon resource for a server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Icon {
    pub src: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

/// One published version of an MCP server, exactly as the publisher sent it.
///
/// `name` is reverse-DNS-like (`namespace/short-name`), case-sensitive, and
/// groups all versions of the same logical server. `version` is free-form but
/// the validating publish path rejects the literal `"latest"` and range
/// operators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServerDetail {
    /// Server name in `namespace/short-name` form
    pub name: String,

    /// Human-readable description of the server's functionality
    pub description: String,

    /// Version string for this record
    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icons: Option<Vec<Icon>>,

    /// JSON schema URL this record claims to conform to
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub packages: Option<Vec<Package>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remotes: Option<Vec<Transport>>,

    /// Opaque publisher-provided metadata, passed through unmodified
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
}
