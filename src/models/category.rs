//! Forum category model and the default niche category list.

use serde::{Deserialize, Serialize};

/// A forum category offered by the category filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Categories of the default Fix-On niche: (id, name, description).
pub const DEFAULT_CATEGORIES: &[(&str, &str, &str)] = &[
    ("celular", "Celular", "Problemas com celular"),
    ("computador", "Computador", "Problemas com PC"),
    ("internet", "Internet", "Problemas de conexão"),
    ("aplicativos", "Aplicativos", "Problemas com apps"),
    ("casa", "Casa", "Problemas domésticos e manutenção"),
    ("carro", "Carro", "Problemas automotivos"),
    ("saude", "Saúde", "Dicas de saúde e bem-estar"),
    ("financas", "Finanças", "Problemas financeiros e dicas"),
];
