//! Search tool implementation
//!
//! Implements the `search_doctors(query, ...)` MCP tool and the `search`
//! CLI command

use crate::cli::SearchArgs;
use crate::error::AppError;
use crate::mcp::{ContentItem, McpResponse, ToolResult};
use crate::search::{ResponseLanguage, SearchEngine, SearchFilters, SearchQuery, SearchResponse};
use crate::search::response::LocationCard;
use serde_json::Value;
use tracing::{debug, info};

/// Handle search_doctors tool call (MCP)
pub async fn handle_search(id: Option<Value>, args: Value, engine: &SearchEngine) -> McpResponse {
    match handle_search_impl(args, engine).and_then(|content| to_json(&content)) {
        Ok(result) => McpResponse::success(id, result),
        Err(e) => McpResponse::error(id, e.error_code(), &e.message()),
    }
}

fn handle_search_impl(args: Value, engine: &SearchEngine) -> Result<ToolResult, AppError> {
    let mut search_args: SearchArgs = serde_json::from_value(args)
        .map_err(|e| AppError::InvalidInput(format!("Invalid arguments: {}", e)))?;
    // MCP clients get the SearchResponse itself as the text content
    search_args.json = true;

    execute_search(engine, search_args)
}

/// Shared implementation for search (used by MCP and CLI)
///
/// The text content is markdown, or pretty JSON when `--json` is set; the
/// structured response always travels in the content metadata.
pub fn execute_search(engine: &SearchEngine, search_args: SearchArgs) -> Result<ToolResult, AppError> {
    let response = run_search(engine, &search_args)?;

    let text = if search_args.json {
        serde_json::to_string_pretty(&response)
            .map_err(|e| AppError::Internal(format!("Failed to serialize response: {}", e)))?
    } else {
        format_search_results(&response, &search_args.query)
    };

    Ok(ToolResult::from_items(vec![ContentItem::text_with_metadata(
        text,
        to_json(&response)?,
    )]))
}

/// Validate arguments and run the ranked search
pub fn run_search(engine: &SearchEngine, search_args: &SearchArgs) -> Result<SearchResponse, AppError> {
    let request = build_query(search_args)?;

    debug!(
        "Search request: query='{}', filters={:?}, limit={}, offset={}, lang={}",
        request.query, request.filters, request.limit, request.offset, request.response_language
    );

    let response = engine.search(&request);

    info!(
        "Search '{}' matched specialties {:?}, returning {} doctors",
        request.query,
        response.analysis.specialties,
        response.doctors.len()
    );

    Ok(response)
}

/// Turn tool arguments into a search request
///
/// Any query string is accepted; only an unknown `lang` is rejected.
pub fn build_query(search_args: &SearchArgs) -> Result<SearchQuery, AppError> {
    let mut request = SearchQuery::new(search_args.query.clone());
    request.filters = SearchFilters {
        city: search_args.city.clone(),
        state: search_args.state.clone(),
        insurance: search_args.insurance.clone(),
        language: search_args.language.clone(),
    };
    if let Some(limit) = search_args.limit {
        request.limit = limit;
    }
    if let Some(offset) = search_args.offset {
        request.offset = offset;
    }
    if let Some(code) = search_args.lang.as_deref() {
        request.response_language = code.parse::<ResponseLanguage>()?;
    }

    Ok(request)
}

/// Format search results into markdown for display
pub fn format_search_results(response: &SearchResponse, query: &str) -> String {
    let mut md = String::new();
    md.push_str(&format!(
        "# Doctors for \"{}\" · {} results\n\n",
        query,
        response.doctors.len()
    ));

    if !response.analysis.specialties.is_empty() {
        md.push_str(&format!(
            "**Specialties:** {}\n\n",
            response.analysis.specialties.join(", ")
        ));
    }
    md.push_str(&format!("> {}\n\n", response.analysis.triage_note));

    for (rank, card) in response.doctors.iter().enumerate() {
        md.push_str(&format!(
            "{}. **{}** ({}) · score {}\n",
            rank + 1,
            card.name,
            card.specialties.join(", "),
            card.score
        ));

        if let LocationCard::Primary {
            clinic_name,
            city,
            state,
        } = &card.location
        {
            let place: Vec<&str> = [clinic_name, city, state]
                .into_iter()
                .filter_map(|part| part.as_deref())
                .collect();
            if !place.is_empty() {
                md.push_str(&format!("   - {}\n", place.join(", ")));
            }
        }
        if !card.languages.is_empty() {
            md.push_str(&format!("   - Languages: {}\n", card.languages.join(", ")));
        }
        if !card.insurances.is_empty() {
            md.push_str(&format!("   - Insurance: {}\n", card.insurances.join("; ")));
        }
        if let Some(phone) = &card.appointment.phone {
            md.push_str(&format!("   - Phone: {}\n", phone));
        }
        for portal in &card.appointment.online_portals {
            if let Some(url) = &portal.url {
                let label = portal.portal_type.as_deref().unwrap_or("Book online");
                md.push_str(&format!("   - [{}]({})\n", label, url));
            }
        }
    }

    md
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, AppError> {
    serde_json::to_value(value)
        .map_err(|e| AppError::Internal(format!("Failed to serialize response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{doctor, location, mapping};
    use crate::catalog::Catalog;
    use crate::search::engine::DEFAULT_LIMIT;
    use serde_json::json;
    use std::sync::Arc;

    fn engine() -> SearchEngine {
        let mut d1 = doctor("d1", "Dr. Alice Wong", &["Cardiology"]);
        d1.locations = Some(vec![location("San Francisco", "CA")]);
        d1.languages = Some(vec!["English".into(), "Cantonese".into()]);
        let d2 = doctor("d2", "Dr. Bob Lee", &["Neurology"]);
        let catalog = Catalog::new(vec![d1, d2], vec![mapping(&["headache"], &["Neurology"])]).unwrap();
        SearchEngine::new(Arc::new(catalog))
    }

    fn args(query: &str) -> SearchArgs {
        SearchArgs {
            query: query.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_query_defaults() {
        let request = build_query(&args("headache")).unwrap();
        assert_eq!(request.limit, DEFAULT_LIMIT);
        assert_eq!(request.offset, 0);
        assert_eq!(request.response_language, ResponseLanguage::En);
        assert!(!request.filters.is_active());
    }

    #[test]
    fn test_build_query_accepts_any_query_text() {
        assert_eq!(build_query(&args("")).unwrap().query, "");
        assert_eq!(build_query(&args("   ")).unwrap().query, "   ");
        let long = "a".repeat(501);
        assert_eq!(build_query(&args(&long)).unwrap().query.len(), 501);
    }

    #[test]
    fn test_build_query_rejects_unknown_lang() {
        let mut bad_lang = args("headache");
        bad_lang.lang = Some("fr".into());
        let err = build_query(&bad_lang).unwrap_err();
        assert_eq!(err.error_code(), "invalid_input");
    }

    #[test]
    fn test_execute_search_markdown() {
        let result = execute_search(&engine(), args("cardiology")).unwrap();
        let item = &result.content[0];

        assert!(item.text.contains("**Dr. Alice Wong** (Cardiology)"));
        assert!(item.text.contains("San Francisco Clinic, San Francisco, CA"));
        assert!(item.text.contains("Languages: English, Cantonese"));
        assert!(!item.text.contains("Dr. Bob Lee"));

        let metadata = item.metadata.as_ref().expect("structured response");
        assert_eq!(metadata["analysis"]["specialties"], json!(["Cardiology"]));
    }

    #[test]
    fn test_execute_search_json() {
        let mut search_args = args("headache");
        search_args.json = true;
        let result = execute_search(&engine(), search_args).unwrap();

        let parsed: Value = serde_json::from_str(&result.content[0].text).unwrap();
        assert_eq!(parsed["doctors"][0]["doctor_id"], "d2");
        assert_eq!(parsed["doctors"][0]["score"], 1.0);
        assert_eq!(parsed["doctors"][0]["location"], json!({}));
    }

    #[tokio::test]
    async fn test_handle_search_invalid_arguments() {
        let resp = handle_search(Some(json!(7)), json!({"city": "Boston"}), &engine()).await;
        let error = resp.error.expect("error expected");
        assert_eq!(error.code, "invalid_input");
    }

    #[tokio::test]
    async fn test_handle_search_success() {
        let resp = handle_search(
            Some(json!(8)),
            json!({"query": "headache", "lang": "zh"}),
            &engine(),
        )
        .await;
        assert!(resp.error.is_none());
        let result = resp.result.expect("result present");
        let note = result["content"][0]["metadata"]["analysis"]["triage_note"]
            .as_str()
            .unwrap();
        assert!(note.starts_with("根据您的查询“headache”"));
    }

    #[tokio::test]
    async fn test_handle_search_text_is_response_json() {
        let engine = engine();
        let resp = handle_search(Some(json!(9)), json!({"query": "cardiology"}), &engine).await;
        let result = resp.result.expect("result present");
        let text = result["content"][0]["text"].as_str().unwrap();

        let parsed: Value = serde_json::from_str(text).expect("text is JSON");
        let expected = serde_json::to_value(run_search(&engine, &args("cardiology")).unwrap()).unwrap();
        assert_eq!(parsed, expected);
        assert_eq!(parsed["doctors"][0]["doctor_id"], "d1");
    }
}
