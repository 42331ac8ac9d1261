// cvar.rs — tunable variable registry
//
// Variables are typed: each one carries a domain (float range or bool) and
// every write is checked against it. Game code never reads the registry
// during a tick; it takes an immutable snapshot once the values settle.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, warn};

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct CvarFlags: u32 {
        const ARCHIVE    = 0x01;
        /// Write protected; only `force_set` changes it.
        const NOSET      = 0x02;
        /// Value is mirrored from the server to every client.
        const REPLICATED = 0x08;
        /// Only writable while cheats are enabled.
        const CHEAT      = 0x80;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CvarValue {
    Float(f32),
    Bool(bool),
}

impl CvarValue {
    pub fn as_float(self) -> f32 {
        match self {
            CvarValue::Float(v) => v,
            CvarValue::Bool(b) => {
                if b {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    pub fn as_bool(self) -> bool {
        match self {
            CvarValue::Float(v) => v != 0.0,
            CvarValue::Bool(b) => b,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CvarDomain {
    Float { min: f32, max: f32 },
    Bool,
}

impl CvarDomain {
    fn contains(&self, value: CvarValue) -> bool {
        match (self, value) {
            (CvarDomain::Float { min, max }, CvarValue::Float(v)) => v >= *min && v <= *max,
            (CvarDomain::Bool, CvarValue::Bool(_)) => true,
            _ => false,
        }
    }

    fn parse(&self, text: &str) -> Option<CvarValue> {
        let text = text.trim();
        match self {
            CvarDomain::Float { .. } => text.parse::<f32>().ok().map(CvarValue::Float),
            CvarDomain::Bool => match text {
                "1" | "true" => Some(CvarValue::Bool(true)),
                "0" | "false" => Some(CvarValue::Bool(false)),
                _ => None,
            },
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum CvarError {
    #[error("unknown variable \"{0}\"")]
    Unknown(String),
    #[error("\"{value}\" is not a valid value for {name}")]
    Parse { name: String, value: String },
    #[error("{name} must be within {domain:?}")]
    OutOfDomain { name: String, domain: CvarDomain },
    #[error("{0} is write protected")]
    WriteProtected(String),
    #[error("{0} is cheat protected")]
    CheatProtected(String),
    #[error("{0} is already registered with a different domain")]
    DomainMismatch(String),
    #[error("{name} has invalid bounds [{min}, {max}]")]
    InvalidBounds { name: String, min: f32, max: f32 },
}

/// A registered tunable variable.
#[derive(Debug, Clone)]
pub struct Cvar {
    pub name: String,
    pub description: String,
    pub flags: CvarFlags,
    pub domain: CvarDomain,
    pub current: CvarValue,
    pub modified: bool,
}

/// The full cvar system context.
#[derive(Debug, Default)]
pub struct CvarContext {
    pub cvar_vars: Vec<Cvar>,
    /// O(1) cvar lookup by name -> index in cvar_vars
    cvar_index: HashMap<String, usize>,
    pub cheats_enabled: bool,
}

impl CvarContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_var_index(&self, name: &str) -> Option<usize> {
        self.cvar_index.get(name).copied()
    }

    pub fn find_var(&self, name: &str) -> Option<&Cvar> {
        self.cvar_index.get(name).map(|&idx| &self.cvar_vars[idx])
    }

    /// Register a float variable. Registering an existing float variable
    /// again ORs in the flags and keeps its current value.
    pub fn register_float(
        &mut self,
        name: &str,
        value: f32,
        min: f32,
        max: f32,
        flags: CvarFlags,
        description: &str,
    ) -> Result<usize, CvarError> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(CvarError::InvalidBounds {
                name: name.to_string(),
                min,
                max,
            });
        }

        self.register(
            name,
            CvarValue::Float(value.clamp(min, max)),
            CvarDomain::Float { min, max },
            flags,
            description,
        )
    }

    pub fn register_bool(
        &mut self,
        name: &str,
        value: bool,
        flags: CvarFlags,
        description: &str,
    ) -> Result<usize, CvarError> {
        self.register(name, CvarValue::Bool(value), CvarDomain::Bool, flags, description)
    }

    fn register(
        &mut self,
        name: &str,
        value: CvarValue,
        domain: CvarDomain,
        flags: CvarFlags,
        description: &str,
    ) -> Result<usize, CvarError> {
        if let Some(&idx) = self.cvar_index.get(name) {
            let var = &mut self.cvar_vars[idx];
            if var.domain != domain {
                return Err(CvarError::DomainMismatch(name.to_string()));
            }
            var.flags |= flags;
            return Ok(idx);
        }

        let idx = self.cvar_vars.len();
        self.cvar_vars.push(Cvar {
            name: name.to_string(),
            description: description.to_string(),
            flags,
            domain,
            current: value,
            modified: false,
        });
        self.cvar_index.insert(name.to_string(), idx);
        debug!(name, ?value, "registered cvar");
        Ok(idx)
    }

    fn set2(&mut self, name: &str, text: &str, force: bool) -> Result<usize, CvarError> {
        let idx = self
            .find_var_index(name)
            .ok_or_else(|| CvarError::Unknown(name.to_string()))?;
        let cheats_enabled = self.cheats_enabled;
        let var = &mut self.cvar_vars[idx];

        if !force {
            if var.flags.contains(CvarFlags::NOSET) {
                return Err(CvarError::WriteProtected(var.name.clone()));
            }
            if var.flags.contains(CvarFlags::CHEAT) && !cheats_enabled {
                return Err(CvarError::CheatProtected(var.name.clone()));
            }
        }

        let value = var.domain.parse(text).ok_or_else(|| CvarError::Parse {
            name: var.name.clone(),
            value: text.to_string(),
        })?;

        if !var.domain.contains(value) {
            warn!(name = %var.name, value = text, "rejected out of domain value");
            return Err(CvarError::OutOfDomain {
                name: var.name.clone(),
                domain: var.domain,
            });
        }

        if value != var.current {
            var.current = value;
            var.modified = true;
        }

        Ok(idx)
    }

    /// Set a variable from console text (respects NOSET and CHEAT flags).
    pub fn set(&mut self, name: &str, text: &str) -> Result<usize, CvarError> {
        self.set2(name, text, false)
    }

    /// Set a variable ignoring NOSET and CHEAT. The domain is still enforced.
    pub fn force_set(&mut self, name: &str, text: &str) -> Result<usize, CvarError> {
        self.set2(name, text, true)
    }

    pub fn value(&self, name: &str) -> Option<CvarValue> {
        self.find_var(name).map(|var| var.current)
    }

    /// Float value of a variable. Returns 0 if not found.
    pub fn variable_value(&self, name: &str) -> f32 {
        self.value(name).map_or(0.0, CvarValue::as_float)
    }

    /// Bool value of a variable. Returns false if not found.
    pub fn variable_enabled(&self, name: &str) -> bool {
        self.value(name).is_some_and(CvarValue::as_bool)
    }

    /// Names of variables changed since the last call; clears the flags.
    pub fn check_modified(&mut self) -> Vec<String> {
        let mut names = Vec::new();
        for var in &mut self.cvar_vars {
            if var.modified {
                var.modified = false;
                names.push(var.name.clone());
            }
        }
        names
    }

    /// Variables carrying the REPLICATED flag.
    pub fn replicated(&self) -> impl Iterator<Item = &Cvar> {
        self.cvar_vars
            .iter()
            .filter(|var| var.flags.contains(CvarFlags::REPLICATED))
    }
}

// ============================================================
// Tests
// ============================================================
