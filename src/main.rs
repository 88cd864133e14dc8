use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::{Value, json};
use time::macros::format_description;

use forge::config::{self, BackendConfig, ConfigError};
use forge::provider::{DataProvider, ListRequest, ProviderError, RestProvider};
use forge::query::{DateCondition, FilterComposer, Operator, Pagination, Precedence, QueryInputs, Sort};
use forge::record::{Record, RecordId};
use forge::session::IdentitySource;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("--data must be a JSON object")]
    NotAnObject,
    #[error("invalid sort `{0}`; expected field, field:asc, or field:desc")]
    InvalidSort(String),
    #[error("invalid date `{0}`; expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Connection flags override the matching `FORGE_*` environment variables.
#[derive(Parser, Debug)]
#[command(name = "forge", about = "Query and edit CRM resources on the hosted backend")]
struct Cli {
    #[arg(long)]
    base_url: Option<String>,

    #[arg(long)]
    api_key: Option<String>,

    #[arg(long)]
    access_token: Option<String>,

    #[arg(long)]
    request_timeout_secs: Option<u64>,

    #[arg(long)]
    connect_timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    /// Value given on the command line for a config variable, if any.
    fn flag_for(&self, var: &str) -> Option<String> {
        match var {
            config::BACKEND_URL_VAR => self.base_url.clone(),
            config::API_KEY_VAR => self.api_key.clone(),
            config::ACCESS_TOKEN_VAR => self.access_token.clone(),
            config::REQUEST_TIMEOUT_VAR => self.request_timeout_secs.map(|v| v.to_string()),
            config::CONNECT_TIMEOUT_VAR => self.connect_timeout_secs.map(|v| v.to_string()),
            config::PAGE_SIZE_VAR => match &self.command {
                Command::List(args) => args.page_size.map(|v| v.to_string()),
                _ => None,
            },
            _ => None,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the signed-in user's id.
    Whoami,
    /// List one page of a resource.
    List(ListArgs),
    /// Print one record.
    Show {
        resource: String,
        id: String,
        #[arg(long)]
        select: Option<String>,
    },
    Create {
        resource: String,
        #[arg(long)]
        data: String,
    },
    Update {
        resource: String,
        id: String,
        #[arg(long)]
        data: String,
    },
    Delete {
        resource: String,
        id: String,
    },
}

#[derive(Args, Debug, Default)]
struct ListArgs {
    resource: String,

    #[arg(long)]
    search: Option<String>,
    #[arg(long, default_value = "name")]
    search_field: String,

    #[arg(long)]
    parent: Option<String>,
    #[arg(long, default_value = "client_id")]
    parent_field: String,

    #[arg(long)]
    status: Option<String>,
    #[arg(long, default_value = "status")]
    status_field: String,

    /// Date as YYYY-MM-DD.
    #[arg(long)]
    date: Option<String>,
    #[arg(long, value_enum, default_value_t = DateOp::Gte)]
    date_op: DateOp,
    #[arg(long, default_value = "created_at")]
    date_field: String,

    /// Apply search and parent filters together instead of search winning.
    #[arg(long, default_value_t = false)]
    combine: bool,

    /// Defaults to `FORGE_PAGE_SIZE`.
    #[arg(long)]
    page_size: Option<u32>,

    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Repeatable: `field`, `field:asc`, or `field:desc`.
    #[arg(long)]
    sort: Vec<String>,

    #[arg(long)]
    select: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum DateOp {
    Eq,
    #[default]
    Gte,
    Lte,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = BackendConfig::from_env_with(|var| cli.flag_for(var))?;
    let page_size = config.page_size;
    let provider = RestProvider::new(config)?;

    match cli.command {
        Command::Whoami => {
            let id = provider.current_user_id().await?;
            print_json(&json!({ "id": id }))
        }
        Command::List(args) => {
            let request = build_list_request(&args, page_size)?;
            let response = provider.list(&request).await?;
            print_json(&json!({ "data": response.data, "total": response.total }))
        }
        Command::Show { resource, id, select } => {
            let record = provider.get_one(&resource, &RecordId::from(id), select.as_deref()).await?;
            print_json(&Value::Object(record))
        }
        Command::Create { resource, data } => {
            let record = provider.create(&resource, &parse_object(&data)?).await?;
            print_json(&Value::Object(record))
        }
        Command::Update { resource, id, data } => {
            let record = provider.update(&resource, &RecordId::from(id), &parse_object(&data)?).await?;
            print_json(&Value::Object(record))
        }
        Command::Delete { resource, id } => {
            let id = RecordId::from(id);
            provider.delete(&resource, &id).await?;
            print_json(&json!({ "deleted": id }))
        }
    }
}

/// `page_size` is the configured size; `--page-size` has already been
/// folded into it.
fn build_list_request(args: &ListArgs, page_size: u32) -> Result<ListRequest, CliError> {
    let precedence = if args.combine { Precedence::Combine } else { Precedence::SearchOverridesParent };
    let composer = FilterComposer::new()
        .search_on(&args.search_field)
        .parent_on(&args.parent_field)
        .status_on(&args.status_field)
        .date_on(&args.date_field)
        .precedence(precedence);
    let inputs = QueryInputs {
        search: args.search.clone(),
        parent: args.parent.clone().map(RecordId::from),
        status: args.status.clone(),
        date: args.date.as_deref().map(|raw| parse_date_condition(args.date_op, raw)).transpose()?,
    };

    let mut request = ListRequest::new(&args.resource)
        .filters(composer.compose(&inputs))
        .pagination(Pagination { current: args.page.max(1), ..Pagination::page_size(page_size) });
    for raw in &args.sort {
        request = request.sort(Sort::parse(raw).ok_or_else(|| CliError::InvalidSort(raw.clone()))?);
    }
    if let Some(select) = &args.select {
        request = request.select(select);
    }
    Ok(request)
}

fn parse_date_condition(op: DateOp, raw: &str) -> Result<DateCondition, CliError> {
    let date = time::Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| CliError::InvalidDate(raw.to_owned()))?;
    let operator = match op {
        DateOp::Eq => Operator::Eq,
        DateOp::Gte => Operator::Gte,
        DateOp::Lte => Operator::Lte,
    };
    Ok(DateCondition { operator, date })
}

fn parse_object(data: &str) -> Result<Record, CliError> {
    match serde_json::from_str::<Value>(data)? {
        Value::Object(map) => Ok(map),
        _ => Err(CliError::NotAnObject),
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
