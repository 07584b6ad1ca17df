use std::fmt::Display;
use std::ops::RangeInclusive;
use std::str::FromStr;

use thiserror::Error;

use super::types::Settings;
use crate::helpers::parse_on_off;

/// Raw values of the settings panel controls. Numeric inputs are kept as the
/// text the user typed until the panel is saved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingsForm {
    pub max_steps: String,
    pub max_actions: String,
    pub viewport_expansion: String,
    pub enable_memory: bool,
    pub memory_interval: String,
    pub generate_gif: bool,
    pub save_conversation: bool,
    pub output_path: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingField {
    MaxSteps,
    MaxActions,
    ViewportExpansion,
    EnableMemory,
    MemoryInterval,
    GenerateGif,
    SaveConversation,
    OutputPath,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{field} must be a whole number, got {value:?}")]
    NotANumber { field: &'static str, value: String },
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: String,
        min: String,
        max: String,
    },
    #[error("{field} expects on or off, got {value:?}")]
    NotAToggle { field: &'static str, value: String },
}

impl SettingField {
    pub const ALL: [SettingField; 8] = [
        SettingField::MaxSteps,
        SettingField::MaxActions,
        SettingField::ViewportExpansion,
        SettingField::EnableMemory,
        SettingField::MemoryInterval,
        SettingField::GenerateGif,
        SettingField::SaveConversation,
        SettingField::OutputPath,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SettingField::MaxSteps => "max-steps",
            SettingField::MaxActions => "max-actions",
            SettingField::ViewportExpansion => "viewport-expansion",
            SettingField::EnableMemory => "enable-memory",
            SettingField::MemoryInterval => "memory-interval",
            SettingField::GenerateGif => "generate-gif",
            SettingField::SaveConversation => "save-conversation",
            SettingField::OutputPath => "output-path",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

impl SettingsForm {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            max_steps: settings.max_steps.to_string(),
            max_actions: settings.max_actions_per_step.to_string(),
            viewport_expansion: settings.viewport_expansion.to_string(),
            enable_memory: settings.enable_memory,
            memory_interval: settings.memory_interval.to_string(),
            generate_gif: settings.generate_gif,
            save_conversation: settings.save_conversation,
            output_path: settings.output_path.clone(),
        }
    }

    /// Writes one control the way typing into it or ticking it would.
    pub fn set(&mut self, field: SettingField, value: &str) -> Result<(), FormError> {
        match field {
            SettingField::MaxSteps => self.max_steps = value.to_string(),
            SettingField::MaxActions => self.max_actions = value.to_string(),
            SettingField::ViewportExpansion => self.viewport_expansion = value.to_string(),
            SettingField::MemoryInterval => self.memory_interval = value.to_string(),
            SettingField::OutputPath => self.output_path = value.to_string(),
            SettingField::EnableMemory => self.enable_memory = parse_toggle(field, value)?,
            SettingField::GenerateGif => self.generate_gif = parse_toggle(field, value)?,
            SettingField::SaveConversation => {
                self.save_conversation = parse_toggle(field, value)?
            }
        }
        Ok(())
    }

    /// Builds a settings record. Numeric fields must be integers inside the
    /// bounds the automation backend accepts.
    pub fn to_settings(&self) -> Result<Settings, FormError> {
        Ok(Settings {
            max_steps: parse_number(SettingField::MaxSteps, &self.max_steps, 1..=100)?,
            max_actions_per_step: parse_number(SettingField::MaxActions, &self.max_actions, 1..=20)?,
            viewport_expansion: parse_number(
                SettingField::ViewportExpansion,
                &self.viewport_expansion,
                -1..=1000,
            )?,
            enable_memory: self.enable_memory,
            memory_interval: parse_number(SettingField::MemoryInterval, &self.memory_interval, 5..=50)?,
            generate_gif: self.generate_gif,
            save_conversation: self.save_conversation,
            output_path: self.output_path.clone(),
        })
    }
}

fn parse_number<T>(field: SettingField, raw: &str, bounds: RangeInclusive<T>) -> Result<T, FormError>
where
    T: FromStr + PartialOrd + Display,
{
    let value = raw.trim().parse::<T>().map_err(|_| FormError::NotANumber {
        field: field.name(),
        value: raw.to_string(),
    })?;
    if !bounds.contains(&value) {
        return Err(FormError::OutOfRange {
            field: field.name(),
            value: value.to_string(),
            min: bounds.start().to_string(),
            max: bounds.end().to_string(),
        });
    }
    Ok(value)
}

fn parse_toggle(field: SettingField, value: &str) -> Result<bool, FormError> {
    parse_on_off(value).ok_or_else(|| FormError::NotAToggle {
        field: field.name(),
        value: value.to_string(),
    })
}
