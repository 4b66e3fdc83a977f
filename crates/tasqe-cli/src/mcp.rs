//! MCP server exposing tasqe lists to AI assistants over stdio.
//!
//! Tool parameters reuse the core parameter types through a transparent
//! wrapper, so the JSON schema an assistant sees is the same shape the CLI
//! converts its arguments into.

use std::future::Future;

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{
        CallToolResult, Content, GetPromptRequestParam, GetPromptResult, Implementation,
        ListPromptsResult, PaginatedRequestParam, Prompt, PromptArgument, PromptMessage,
        PromptMessageContent, PromptMessageRole, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tasqe_core::{
    params as core, prompts::extraction_prompt, GenerateOutcome, Organizer, TasqeError,
};
use tokio::signal::unix::{signal, SignalKind};

/// Transparent MCP wrapper adding `Deserialize` and `JsonSchema` handling to a
/// core parameter type.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type GenerateTodo = McpParams<core::GenerateTodo>;
pub type ListName = McpParams<core::ListName>;
pub type AddTask = McpParams<core::AddTask>;
pub type TaskLocation = McpParams<core::TaskLocation>;
pub type Upcoming = McpParams<core::Upcoming>;

pub type McpResult = Result<CallToolResult, McpError>;

/// Maps an organizer error onto the MCP error space.
///
/// Errors the caller can fix by changing the request become `invalid_params`;
/// everything else is reported as an internal error.
pub fn to_mcp_error(context: &str, error: &TasqeError) -> McpError {
    let message = format!("{context}: {error}");
    match error {
        TasqeError::InvalidInput { .. }
        | TasqeError::ListNotFound { .. }
        | TasqeError::ListExists { .. }
        | TasqeError::CategoryNotFound { .. }
        | TasqeError::TaskNotFound { .. }
        | TasqeError::InjectionDetected
        | TasqeError::MissingCredential => McpError::invalid_params(message, None),
        _ => McpError::internal_error(message, None),
    }
}

fn text_result(text: impl Into<String>) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(text.into())]))
}

/// Argument definition for a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplateArg {
    pub name: String,
    pub description: String,
    pub required: bool,
}

/// Definition of a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub name: String,
    pub description: String,
    pub template: String,
    pub arguments: Vec<PromptTemplateArg>,
}

/// Prompts offered by the server, dated against the organizer's clock.
pub fn prompt_templates(organizer: &Organizer) -> Vec<PromptTemplate> {
    let today = organizer.client_config().today();
    vec![PromptTemplate {
        name: "weekly_todo".to_string(),
        description: "Turn a description of the week into a categorized markdown to-do outline"
            .to_string(),
        template: format!("{}\n\n# My week\n{{week}}", extraction_prompt(today)),
        arguments: vec![PromptTemplateArg {
            name: "week".to_string(),
            description: "Free-form description of what is coming up this week".to_string(),
            required: true,
        }],
    }]
}

/// Fills `{name}` placeholders from the request arguments.
///
/// # Errors
///
/// Returns `invalid_params` when a required argument is absent or not a
/// string.
fn render_template(
    template: &PromptTemplate,
    arguments: Option<&serde_json::Map<String, serde_json::Value>>,
) -> Result<String, McpError> {
    let mut text = template.template.clone();
    for arg in &template.arguments {
        let value = arguments.and_then(|args| args.get(&arg.name));
        match value.map(|v| v.as_str()) {
            Some(Some(value)) => {
                text = text.replace(&format!("{{{}}}", arg.name), value);
            }
            Some(None) if arg.required => {
                return Err(McpError::invalid_params(
                    format!("Argument '{}' must be a string", arg.name),
                    None,
                ));
            }
            None if arg.required => {
                return Err(McpError::invalid_params(
                    format!("Required argument '{}' is missing", arg.name),
                    None,
                ));
            }
            _ => {}
        }
    }
    Ok(text)
}

/// MCP server for tasqe
#[derive(Clone)]
pub struct TasqeMcpServer {
    organizer: Organizer,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl TasqeMcpServer {
    pub fn new(organizer: Organizer) -> Self {
        Self {
            organizer,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "list_lists",
        description = "List every saved to-do list with its favorite flag and done/total task counts. Favorites come first, then the most recently updated."
    )]
    async fn list_lists(&self) -> McpResult {
        debug!("list_lists");
        let summaries = self
            .organizer
            .list_summaries()
            .await
            .map_err(|e| to_mcp_error("Failed to list lists", &e))?;
        text_result(summaries.to_string())
    }

    #[tool(
        name = "show_list",
        description = "Show one list by name with its categories, tasks and subtasks. Categories and tasks are numbered; use those 1-based positions with toggle_done."
    )]
    async fn show_list(&self, Parameters(params): Parameters<ListName>) -> McpResult {
        debug!("show_list: {:?}", params);
        let params = params.as_ref();
        match self
            .organizer
            .show_list(params)
            .await
            .map_err(|e| to_mcp_error("Failed to show list", &e))?
        {
            Some(list) => text_result(list.to_string()),
            None => Err(McpError::invalid_params(
                format!("List '{}' not found", params.name),
                None,
            )),
        }
    }

    #[tool(
        name = "upcoming",
        description = "Show dated tasks across all lists, grouped by category. Without a day, covers today through the next seven days; with day=YYYY-MM-DD, covers everything due up to that day."
    )]
    async fn upcoming(&self, Parameters(params): Parameters<Upcoming>) -> McpResult {
        debug!("upcoming: {:?}", params);
        let upcoming = self
            .organizer
            .upcoming(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to collect upcoming tasks", &e))?;
        text_result(upcoming.to_string())
    }

    #[tool(
        name = "generate_todo",
        description = "Turn a free-form description of the week into a structured to-do list and save it. mode=replace (default) overwrites the target list; mode=append adds new categories and appends tasks to categories with the same name. The list defaults to 'To Do List'."
    )]
    async fn generate_todo(&self, Parameters(params): Parameters<GenerateTodo>) -> McpResult {
        debug!("generate_todo: list={:?}", params.as_ref().list);
        let outcome = self
            .organizer
            .generate_todo(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to generate list", &e))?;
        match outcome {
            GenerateOutcome::Rejected(rejection) => Ok(CallToolResult::error(vec![
                Content::text(rejection.message()),
            ])),
            merged => text_result(merged.to_string()),
        }
    }

    #[tool(
        name = "add_task",
        description = "Add a task to a list. The category is matched ignoring case and created when missing; the list is created when missing. date must be YYYY-MM-DD."
    )]
    async fn add_task(&self, Parameters(params): Parameters<AddTask>) -> McpResult {
        debug!("add_task: {:?}", params);
        let path = self
            .organizer
            .add_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add task", &e))?;
        text_result(format!(
            "Added '{}' as task {}.{}",
            params.as_ref().name.trim(),
            path.category + 1,
            path.task + 1
        ))
    }

    #[tool(
        name = "toggle_done",
        description = "Flip the done flag of a task, or of a subtask when subtask is given. Positions are 1-based as shown by show_list."
    )]
    async fn toggle_done(&self, Parameters(params): Parameters<TaskLocation>) -> McpResult {
        debug!("toggle_done: {:?}", params);
        let done = self
            .organizer
            .toggle_done(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to toggle task", &e))?;
        text_result(if done { "Marked done" } else { "Marked open" })
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        debug!("list_prompts");
        let prompts = prompt_templates(&self.organizer)
            .iter()
            .map(|template| {
                Prompt::new(
                    &template.name,
                    Some(&template.description),
                    Some(
                        template
                            .arguments
                            .iter()
                            .map(|arg| PromptArgument {
                                name: arg.name.clone(),
                                description: Some(arg.description.clone()),
                                required: Some(arg.required),
                            })
                            .collect(),
                    ),
                )
            })
            .collect();

        Ok(ListPromptsResult {
            next_cursor: None,
            prompts,
        })
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        debug!("get_prompt: {}", request.name);
        let templates = prompt_templates(&self.organizer);
        let template = templates
            .iter()
            .find(|t| t.name == request.name)
            .ok_or_else(|| McpError::invalid_params("Prompt not found", None))?;

        let text = render_template(template, request.arguments.as_ref())?;

        Ok(GetPromptResult {
            description: Some(template.description.clone()),
            messages: vec![PromptMessage {
                role: PromptMessageRole::User,
                content: PromptMessageContent::text(text),
            }],
        })
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for TasqeMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: "tasqe".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(r#"tasqe turns a free-form description of someone's week into named to-do lists made of categories, tasks and subtasks.

## Concepts
- **Lists**: named documents; "To Do List" is the default. Lists can be starred as favorites.
- **Categories**: broad groupings such as "Health" or "Work", each holding tasks.
- **Tasks**: a name, optional description, time estimate, optional due date (YYYY-MM-DD), done flag and optional subtasks.

## Workflow
1. Use `generate_todo` with the user's own words to build or extend a list. Use mode=append to merge into an existing list.
2. Use `list_lists` and `show_list` to review what is saved.
3. Use `add_task` for one-off additions and `toggle_done` to check items off.
4. Use `upcoming` to see what is due in the next week.

The `weekly_todo` prompt returns the outline instructions used by `generate_todo` for the first stage, filled in with a description of the week."#.to_string()),
        }
    }

    async fn list_prompts(
        &self,
        request: Option<PaginatedRequestParam>,
        context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        self.list_prompts(request, context).await
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.get_prompt(request, context).await
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: TasqeMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting tasqe MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tasqe_core::{ClientConfig, OrganizerBuilder};

    use super::*;

    async fn organizer() -> Organizer {
        OrganizerBuilder::new()
            .in_memory()
            .with_client_config(
                ClientConfig::new().with_fixed_date(jiff::civil::date(2025, 9, 8)),
            )
            .build()
            .await
            .unwrap()
    }

    #[test]
    fn test_error_mapping() {
        let user = to_mcp_error(
            "Failed",
            &TasqeError::ListNotFound {
                name: "Week".to_string(),
            },
        );
        assert_eq!(user.code, McpError::invalid_params("", None).code);
        assert!(user.message.contains("List 'Week' not found"));

        let internal = to_mcp_error("Failed", &TasqeError::unexpected("outline", "no choices"));
        assert_eq!(internal.code, McpError::internal_error("", None).code);
    }

    #[tokio::test]
    async fn test_weekly_prompt_substitutes_week() {
        let organizer = organizer().await;
        let templates = prompt_templates(&organizer);
        let template = &templates[0];
        assert_eq!(template.name, "weekly_todo");

        let args = json!({ "week": "Gym Monday, exam Thursday" });
        let text = render_template(template, args.as_object()).unwrap();
        assert!(text.starts_with("Today is Monday, September 08, 2025"));
        assert!(text.ends_with("# My week\nGym Monday, exam Thursday"));
    }

    #[tokio::test]
    async fn test_weekly_prompt_requires_week() {
        let organizer = organizer().await;
        let templates = prompt_templates(&organizer);

        assert!(render_template(&templates[0], None).is_err());
        let wrong_type = json!({ "week": 3 });
        assert!(render_template(&templates[0], wrong_type.as_object()).is_err());
    }

    #[tokio::test]
    async fn test_server_registers_tools() {
        let server = TasqeMcpServer::new(organizer().await);
        let names: Vec<_> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        for expected in [
            "list_lists",
            "show_list",
            "upcoming",
            "generate_todo",
            "add_task",
            "toggle_done",
        ] {
            assert!(names.contains(&expected.to_string()), "missing {expected}");
        }
    }
}
