use crate::infra::build_lookup_service;
use clap::Args;
use therapist_finder::config::AppConfig;
use therapist_finder::error::AppError;
use therapist_finder::lookup::{LookupQuery, LookupResponse};

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    /// Five-digit US postal code to search
    #[arg(long)]
    pub(crate) zip: String,
    /// Free-text focus used to rank providers (e.g. "addiction", "marriage")
    #[arg(long)]
    pub(crate) focus: Option<String>,
    /// Print the raw JSON envelope instead of a listing
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) async fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let SearchArgs { zip, focus, json } = args;

    let query = LookupQuery::new(zip, focus)?;
    let config = AppConfig::load()?;
    let service = build_lookup_service(&config.registry)?;
    let response = service.lookup(&query).await?;

    if json {
        let rendered = serde_json::to_string_pretty(&response)
            .map_err(|err| AppError::Io(std::io::Error::other(err)))?;
        println!("{rendered}");
    } else {
        print!("{}", render_results(&response));
    }

    Ok(())
}

fn render_results(response: &LookupResponse) -> String {
    let mut lines = Vec::new();

    lines.push(match response.query.focus.as_deref() {
        Some(focus) => format!(
            "Therapist lookup for {} (focus: {focus})",
            response.query.zip
        ),
        None => format!("Therapist lookup for {}", response.query.zip),
    });

    if response.results.is_empty() {
        lines.push("No mental-health providers found".to_string());
    } else {
        lines.push(format!("{} mental-health providers\n", response.count));
    }

    for entry in &response.results {
        let provider = &entry.provider;
        let credential = provider
            .credential
            .as_deref()
            .map(|credential| format!(", {credential}"))
            .unwrap_or_default();
        let location = match (provider.city.as_deref(), provider.state.as_deref()) {
            (Some(city), Some(state)) => format!("{city}, {state}"),
            (Some(place), None) | (None, Some(place)) => place.to_string(),
            (None, None) => "location unknown".to_string(),
        };
        let npi = provider
            .npi
            .as_ref()
            .map(|npi| npi.to_string())
            .unwrap_or_else(|| "-".to_string());

        lines.push(format!(
            "- [{}] {}{} | {} | {} | NPI {}",
            entry.score,
            provider.name,
            credential,
            location,
            provider.phone.as_deref().unwrap_or("no phone"),
            npi
        ));
        for taxonomy in &provider.taxonomies {
            lines.push(format!("    {} ({})", taxonomy.description, taxonomy.code));
        }
    }

    let mut rendered = lines.join("\n");
    rendered.push('\n');
    rendered
}
