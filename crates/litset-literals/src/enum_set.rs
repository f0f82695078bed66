//! Enum domains and sets of enum members
//!
//! An enum type is declared once in an [`EnumRegistry`] as an [`EnumDomain`]
//! (name plus ordered `(name, value)` members) and shared through an `Arc`.
//! An [`EnumValueSet`] refers to members by their index in that domain.
//! Combining sets from different domains is an error.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{LiteralError, LiteralResult};

/// Identifier of a declared enum domain, unique within its registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnumDomainId(u32);

impl EnumDomainId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A member of an enum domain
#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    pub name: String,
    pub value: Value,
}

/// A declared enum type
#[derive(Debug, PartialEq)]
pub struct EnumDomain {
    id: EnumDomainId,
    name: String,
    members: Vec<EnumMember>,
}

impl EnumDomain {
    pub fn id(&self) -> EnumDomainId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[EnumMember] {
        &self.members
    }

    pub fn member(&self, index: usize) -> Option<&EnumMember> {
        self.members.get(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.members.iter().position(|m| m.name == name)
    }

    fn same_members(&self, members: &[EnumMember]) -> bool {
        self.members == members
    }
}

/// Declared enum domains by name
#[derive(Debug, Default)]
pub struct EnumRegistry {
    domains: IndexMap<String, Arc<EnumDomain>>,
}

impl EnumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an enum, or return the existing domain if it was declared
    /// before with the same members
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        members: impl IntoIterator<Item = (String, Value)>,
    ) -> LiteralResult<Arc<EnumDomain>> {
        let name = name.into();
        let members: Vec<EnumMember> = members
            .into_iter()
            .map(|(name, value)| EnumMember { name, value })
            .collect();

        let mut seen = BTreeSet::new();
        if let Some(duplicate) = members.iter().find(|m| !seen.insert(m.name.as_str())) {
            return Err(LiteralError::value(format!(
                "enum {name} declares member {} twice",
                duplicate.name
            )));
        }

        if let Some(existing) = self.domains.get(&name) {
            if existing.same_members(&members) {
                return Ok(Arc::clone(existing));
            }
            return Err(LiteralError::value(format!(
                "enum {name} already declared with different members"
            )));
        }

        let id = u32::try_from(self.domains.len())
            .map(EnumDomainId)
            .map_err(|_| LiteralError::value("too many enum domains"))?;
        let domain = Arc::new(EnumDomain {
            id,
            name: name.clone(),
            members,
        });
        log::debug!(
            "declared enum {name} ({} members) as domain {}",
            domain.members.len(),
            id.index()
        );
        self.domains.insert(name, Arc::clone(&domain));
        Ok(domain)
    }

    pub fn get(&self, name: &str) -> Option<Arc<EnumDomain>> {
        self.domains.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

/// Set of members of one enum domain
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValueSet {
    domain: Arc<EnumDomain>,
    values: BTreeSet<usize>,
}

impl EnumValueSet {
    /// Set of the named members; unknown names are rejected
    pub fn new<'a>(
        domain: Arc<EnumDomain>,
        names: impl IntoIterator<Item = &'a str>,
    ) -> LiteralResult<Self> {
        let values = names
            .into_iter()
            .map(|name| {
                domain.index_of(name).ok_or_else(|| {
                    LiteralError::value(format!("{name} is not a member of enum {}", domain.name))
                })
            })
            .collect::<LiteralResult<BTreeSet<_>>>()?;
        Ok(Self { domain, values })
    }

    pub fn empty(domain: Arc<EnumDomain>) -> Self {
        Self {
            domain,
            values: BTreeSet::new(),
        }
    }

    /// Every member of the domain
    pub fn unbounded(domain: Arc<EnumDomain>) -> Self {
        let values = (0..domain.members.len()).collect();
        Self { domain, values }
    }

    pub fn domain(&self) -> &Arc<EnumDomain> {
        &self.domain
    }

    /// Selected members in declaration order
    pub fn members(&self) -> impl Iterator<Item = &EnumMember> + '_ {
        self.values
            .iter()
            .filter_map(|&index| self.domain.member(index))
    }

    pub fn member_names(&self) -> Vec<&str> {
        self.members().map(|m| m.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_singleton(&self) -> bool {
        self.values.len() == 1
    }

    pub fn contains(&self, name: &str) -> bool {
        self.domain
            .index_of(name)
            .is_some_and(|index| self.values.contains(&index))
    }

    pub fn get_single(&self) -> LiteralResult<&EnumMember> {
        if !self.is_singleton() {
            return Err(LiteralError::not_singleton(format!(
                "{} members",
                self.values.len()
            )));
        }
        self.any()
    }

    /// First selected member in declaration order
    pub fn any(&self) -> LiteralResult<&EnumMember> {
        self.members()
            .next()
            .ok_or_else(|| LiteralError::value("empty enum set has no members"))
    }

    fn check_domain(&self, other: &EnumValueSet) -> LiteralResult<()> {
        if Arc::ptr_eq(&self.domain, &other.domain) || self.domain == other.domain {
            return Ok(());
        }
        Err(LiteralError::value(format!(
            "enum domains differ: {} and {}",
            self.domain.name, other.domain.name
        )))
    }

    fn with_values(&self, values: BTreeSet<usize>) -> EnumValueSet {
        Self {
            domain: Arc::clone(&self.domain),
            values,
        }
    }

    pub fn intersect(&self, other: &EnumValueSet) -> LiteralResult<EnumValueSet> {
        self.check_domain(other)?;
        Ok(self.with_values(self.values.intersection(&other.values).copied().collect()))
    }

    pub fn difference(&self, other: &EnumValueSet) -> LiteralResult<EnumValueSet> {
        self.check_domain(other)?;
        Ok(self.with_values(self.values.difference(&other.values).copied().collect()))
    }

    pub fn is_subset_of(&self, other: &EnumValueSet) -> LiteralResult<bool> {
        self.check_domain(other)?;
        Ok(self.values.is_subset(&other.values))
    }

    pub fn equals(&self, other: &EnumValueSet) -> LiteralResult<bool> {
        self.check_domain(other)?;
        Ok(self.values == other.values)
    }

    pub fn union(&self, _other: &EnumValueSet) -> LiteralResult<EnumValueSet> {
        Err(LiteralError::not_implemented("union of enum sets"))
    }

    pub fn symmetric_difference(&self, _other: &EnumValueSet) -> LiteralResult<EnumValueSet> {
        Err(LiteralError::not_implemented(
            "symmetric difference of enum sets",
        ))
    }
}

impl fmt::Display for EnumValueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{", self.domain.name)?;
        for (i, name) in self.member_names().into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}")?;
        }
        write!(f, "}}")
    }
}
