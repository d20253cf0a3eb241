//! MCP server exposing record search over stdio.

use crate::config::EngineConfig;
use crate::state::RecordState;
use crate::tools::load_dataset::{LoadDatasetRequest, handle_load_dataset};
use crate::tools::lookup::{LookupRequest, handle_lookup};
use crate::tools::search::{SearchRequest, handle_search};
use crate::tools::status::handle_status;
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars::{self, JsonSchema, generate::SchemaSettings},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP Server for legal-code, violation and situation lookups
#[derive(Clone)]
pub struct RecordServer {
    /// Shared dataset state
    state: Arc<RecordState>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for RecordServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordServer")
            .field("state", &self.state)
            .finish()
    }
}

#[tool_router]
impl RecordServer {
    /// Create a server with no dataset loaded.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_state(Arc::new(RecordState::new(config)))
    }

    /// Create a server around existing state (e.g. preloaded at startup).
    pub fn with_state(state: Arc<RecordState>) -> Self {
        Self {
            state,
            tool_router: Self::tool_router(),
        }
    }

    /// Get a reference to the shared state.
    pub fn state(&self) -> &Arc<RecordState> {
        &self.state
    }

    #[tool(
        description = "Load or reload the record dataset from a JSON file. Accepts a bare array or an object wrapping the array under items, data, sections or situations. Unchanged files are not re-indexed."
    )]
    async fn load_dataset(
        &self,
        Parameters(request): Parameters<LoadDatasetRequest>,
    ) -> std::result::Result<String, String> {
        handle_load_dataset(&self.state, request).await
    }

    #[tool(
        description = "Search records by code or keywords. Codes match with or without a 'PC' prefix ('PC 2.10.6' = '2.10.6'). Results are ranked by weighted relevance (code, title, keywords, category) with a literal-phrase fallback, and can be re-sorted by code, fine or stars.",
        input_schema = inline_schema_for_type::<SearchRequest>()
    )]
    async fn search_records(
        &self,
        Parameters(request): Parameters<SearchRequest>,
    ) -> std::result::Result<String, String> {
        Ok(handle_search(&self.state, &request))
    }

    #[tool(description = "Show the full record for one exact code, with or without a 'PC' prefix.")]
    async fn lookup_record(
        &self,
        Parameters(request): Parameters<LookupRequest>,
    ) -> std::result::Result<String, String> {
        handle_lookup(&self.state, &request)
    }

    #[tool(description = "Report whether a dataset is loaded, how many records it holds, and the categories available for filtering.")]
    async fn dataset_status(&self) -> std::result::Result<String, String> {
        Ok(handle_status(&self.state))
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for RecordServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_instructions(
                "penal-search: ranked lookup of penal codes, traffic violations and situational playbooks. \
                 Load a JSON dataset with load_dataset (unless one was given at startup), then use \
                 search_records for free text or codes and lookup_record for a single code.",
            )
    }
}

/// Generate an inline JSON schema for MCP tools
///
/// Unlike rmcp's default `schema_for_type()`, this function sets `inline_subschemas = true`
/// to generate inline enum definitions instead of $ref patterns. This ensures MCP Inspector
/// displays enums as dropdown widgets rather than raw JSON input fields.
pub fn inline_schema_for_type<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.transforms = vec![Box::new(schemars::transform::AddNullable::default())];
    settings.inline_subschemas = true;

    let generator = settings.into_generator();
    let schema = generator.into_root_schema_for::<T>();
    let object = serde_json::to_value(schema).expect("failed to serialize schema");

    let json_object = match object {
        serde_json::Value::Object(object) => object,
        _ => panic!("Schema serialization produced non-object value"),
    };

    Arc::new(json_object)
}
