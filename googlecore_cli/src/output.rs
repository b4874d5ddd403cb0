use googlecore::{ApiDefinition, Response, ASYNC_PREFIX};
use serde::Serialize;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled, Serialize)]
struct MethodRow {
    #[tabled(rename = "Method")]
    #[serde(rename = "Method")]
    name: String,
    #[tabled(rename = "Async Variant")]
    #[serde(rename = "Async Variant")]
    async_name: String,
    #[tabled(rename = "HTTP")]
    #[serde(rename = "HTTP")]
    http: String,
    #[tabled(rename = "Path")]
    #[serde(rename = "Path")]
    path: String,
    #[tabled(rename = "Required")]
    #[serde(rename = "Required")]
    required: String,
    #[tabled(rename = "Optional")]
    #[serde(rename = "Optional")]
    optional: String,
    #[tabled(rename = "Paginated")]
    #[serde(rename = "Paginated")]
    paginated: bool,
    #[tabled(rename = "Description")]
    #[serde(rename = "Description")]
    doc: String,
}

#[derive(Tabled, Serialize)]
struct PageRow {
    #[tabled(rename = "Page")]
    #[serde(rename = "Page")]
    page: usize,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Results")]
    #[serde(rename = "Results")]
    results: String,
    #[tabled(rename = "Next Page Token")]
    #[serde(rename = "Next Page Token")]
    next_page_token: String,
}

// -- Row builders --

fn build_method_rows(definition: &ApiDefinition) -> Vec<MethodRow> {
    definition
        .methods
        .iter()
        .map(|m| MethodRow {
            name: m.name.to_string(),
            async_name: format!("{}{}", ASYNC_PREFIX, m.name),
            http: m.http_method.to_string(),
            path: m.path.to_string(),
            required: m.required_args.join(", "),
            optional: m.optional_args.join(", "),
            paginated: m.paginated,
            doc: m.doc.to_string(),
        })
        .collect()
}

fn build_page_rows(pages: &[Response]) -> Vec<PageRow> {
    pages
        .iter()
        .enumerate()
        .map(|(i, page)| PageRow {
            page: i + 1,
            status: page.status().unwrap_or("-").to_string(),
            results: page
                .get("results")
                .and_then(|r| r.as_array())
                .map(|r| r.len().to_string())
                .unwrap_or_else(|| "-".to_string()),
            next_page_token: page
                .next_page_token()
                .map(truncate_token)
                .unwrap_or_default(),
        })
        .collect()
}

// -- Table output --

pub fn print_methods_table(definition: &ApiDefinition) {
    println!("{}", Table::new(build_method_rows(definition)));
}

pub fn print_pages_table(pages: &[Response]) {
    println!("{}", Table::new(build_page_rows(pages)));
}

pub fn print_methods_json(definition: &ApiDefinition) {
    print_json(&build_method_rows(definition));
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn truncate_token(token: &str) -> String {
    const MAX: usize = 16;
    if token.chars().count() <= MAX {
        token.to_string()
    } else {
        format!("{}...", token.chars().take(MAX).collect::<String>())
    }
}
