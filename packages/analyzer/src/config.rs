use crate::element::{ElementKind, PropertyBindingKind};
use anyhow::Context;
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Names the analyzer recognizes in user code and templates.
///
/// Every field has a default matching the framework's own names, so a config
/// file only needs to list what it overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzerOptions {
    pub annotations: AnnotationNames,
    /// Per-field annotation name to the binding kind it declares.
    pub property_annotations: IndexMap<String, PropertyBindingKind>,
    pub module_class_name: String,
    pub module_methods: ModuleMethodNames,
    pub repeat_attribute: String,
    pub expression_attributes: Vec<String>,
    pub interpolation: InterpolationConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnnotationNames {
    pub component: String,
    pub controller: String,
    pub directive: String,
    pub filter: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModuleMethodNames {
    pub install: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InterpolationConfig {
    pub start: String,
    pub end: String,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        let property_annotations = [
            ("NgAttr", PropertyBindingKind::Attr),
            ("NgCallback", PropertyBindingKind::Callback),
            ("NgOneWay", PropertyBindingKind::OneWay),
            ("NgOneWayOneTime", PropertyBindingKind::OneWayOneTime),
            ("NgTwoWay", PropertyBindingKind::TwoWay),
        ]
        .into_iter()
        .map(|(name, kind)| (name.to_string(), kind))
        .collect();
        AnalyzerOptions {
            annotations: AnnotationNames::default(),
            property_annotations,
            module_class_name: "Module".to_string(),
            module_methods: ModuleMethodNames::default(),
            repeat_attribute: "ng-repeat".to_string(),
            expression_attributes: [
                "ng-click", "ng-if", "ng-show", "ng-hide", "ng-model", "ng-bind", "ng-class",
                "ng-switch",
            ]
            .iter()
            .map(|name| name.to_string())
            .collect(),
            interpolation: InterpolationConfig::default(),
        }
    }
}

impl Default for AnnotationNames {
    fn default() -> Self {
        AnnotationNames {
            component: "NgComponent".to_string(),
            controller: "NgController".to_string(),
            directive: "NgDirective".to_string(),
            filter: "NgFilter".to_string(),
        }
    }
}

impl Default for ModuleMethodNames {
    fn default() -> Self {
        ModuleMethodNames {
            install: "install".to_string(),
            type_: "type".to_string(),
            value: "value".to_string(),
        }
    }
}

impl Default for InterpolationConfig {
    fn default() -> Self {
        InterpolationConfig {
            start: "{{".to_string(),
            end: "}}".to_string(),
        }
    }
}

impl AnalyzerOptions {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read analyzer options from {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("invalid analyzer options in {}", path.display()))
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let options: AnalyzerOptions = serde_json::from_str(content)?;
        Ok(options)
    }

    /// Kind of element declared by a class-level annotation called `name`.
    /// Modules are recognized structurally, never by annotation.
    pub fn element_kind_for_annotation(&self, name: &str) -> Option<ElementKind> {
        let names = &self.annotations;
        if name == names.component {
            Some(ElementKind::Component)
        } else if name == names.controller {
            Some(ElementKind::Controller)
        } else if name == names.directive {
            Some(ElementKind::Directive)
        } else if name == names.filter {
            Some(ElementKind::Filter)
        } else {
            None
        }
    }

    pub fn property_kind_for_annotation(&self, name: &str) -> Option<PropertyBindingKind> {
        self.property_annotations.get(name).copied()
    }
}
