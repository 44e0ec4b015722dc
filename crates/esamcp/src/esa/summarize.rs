use esamcp_core::error::OperationError;
use esamcp_core::normalize::TeamName;
use esamcp_core::prompt::{build_summary_prompt, parse_post_number, SummaryFormat};
use esamcp_core::response::PromptResult;
use serde::Deserialize;

use super::posts::fetch_post;
use super::{run_prompt, EsaApi, Query};

/// Arguments of the `esa_summarize_post` prompt; prompt arguments are strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizePostArgs {
    #[serde(default)]
    pub team_name: TeamName,
    #[serde(default)]
    pub post_number: String,
    pub format: Option<SummaryFormat>,
}

async fn summarize_post_data<A: EsaApi>(
    api: &A,
    args: &SummarizePostArgs,
) -> Result<String, OperationError> {
    let team = args.team_name.require()?;
    let post_number = parse_post_number(&args.post_number)?;
    let post = fetch_post(api, team, post_number, Query::new()).await?;

    Ok(build_summary_prompt(&post, args.format.unwrap_or_default()))
}

pub async fn summarize_post<A: EsaApi>(api: &A, args: SummarizePostArgs) -> PromptResult {
    run_prompt(summarize_post_data(api, &args)).await
}
