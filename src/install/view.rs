//! Copy and actions of the install prompt per variant.

use serde::Serialize;

use super::InstallVariant;

pub const TITLE: &str = "Instale o Fix-On";
pub const SUBTITLE: &str = "Acesse mais rápido!";
pub const BENEFITS: [&str; 3] = [
    "Acesso direto da tela inicial",
    "Funciona offline",
    "Carrega mais rápido",
];

/// What a button does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PromptAction {
    Install,
    Dismiss,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptButton {
    pub label: &'static str,
    pub action: PromptAction,
}

/// Render-ready install prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallPromptView {
    pub variant: InstallVariant,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub benefits: [&'static str; 3],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions_heading: Option<&'static str>,
    pub instructions: Vec<&'static str>,
    pub primary: PromptButton,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<PromptButton>,
}

impl InstallPromptView {
    pub fn for_variant(variant: InstallVariant) -> Self {
        let understood = PromptButton {
            label: "Entendi",
            action: PromptAction::Dismiss,
        };

        let (instructions_heading, instructions, primary, secondary) = match variant {
            InstallVariant::Native => (
                None,
                Vec::new(),
                PromptButton {
                    label: "Instalar Agora",
                    action: PromptAction::Install,
                },
                Some(PromptButton {
                    label: "Agora não",
                    action: PromptAction::Dismiss,
                }),
            ),
            InstallVariant::IosManual => (
                Some("No Safari:"),
                vec![
                    "Toque em Compartilhar",
                    "Selecione \"Adicionar à Tela de Início\"",
                ],
                understood,
                None,
            ),
            InstallVariant::GenericManual => (
                None,
                vec!["Procure o ícone ⊕ na barra de endereços do navegador"],
                understood,
                None,
            ),
        };

        Self {
            variant,
            title: TITLE,
            subtitle: SUBTITLE,
            benefits: BENEFITS,
            instructions_heading,
            instructions,
            primary,
            secondary,
        }
    }

    /// Whether any button on this view triggers the native install.
    pub fn offers_install(&self) -> bool {
        self.primary.action == PromptAction::Install
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_native_offers_install() {
        assert!(InstallPromptView::for_variant(InstallVariant::Native).offers_install());
        assert!(!InstallPromptView::for_variant(InstallVariant::IosManual).offers_install());
        assert!(!InstallPromptView::for_variant(InstallVariant::GenericManual).offers_install());
    }

    #[test]
    fn test_ios_copy() {
        let view = InstallPromptView::for_variant(InstallVariant::IosManual);
        assert_eq!(view.instructions_heading, Some("No Safari:"));
        assert_eq!(view.instructions.len(), 2);
        assert_eq!(view.primary.label, "Entendi");
        assert!(view.secondary.is_none());
    }
}
