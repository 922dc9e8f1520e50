//! Navigation targets of the community pages.

const COMMUNITY_HOME: &str = "/comunidade";

pub fn community_home() -> String {
    COMMUNITY_HOME.to_string()
}

pub fn topic_detail(id: &str) -> String {
    format!("{}/topico/{}", COMMUNITY_HOME, urlencoding::encode(id))
}

/// Topic creation page, pre-filling the title when arriving from a failed search.
pub fn new_topic(prefill_title: Option<&str>) -> String {
    match prefill_title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => format!(
            "{}/novo-topico?titulo={}",
            COMMUNITY_HOME,
            urlencoding::encode(title)
        ),
        None => format!("{}/novo-topico", COMMUNITY_HOME),
    }
}

/// Summary line of the solution search page.
pub fn search_result_label(query: &str, count: usize) -> String {
    match count {
        0 => format!("Nenhum resultado para \"{}\"", query),
        1 => format!("1 resultado para \"{}\"", query),
        n => format!("{} resultados para \"{}\"", n, query),
    }
}
