use std::collections::HashMap;

use melis_data::cluster_library::{
    AttributeDefinition, AttributeIdentifier, ClusterIdentifier, CommandDefinition, Direction,
};

use crate::cluster_library::clusters;

/// Attribute and command tables of a cluster
#[derive(Debug, PartialEq, Eq)]
pub struct ClusterKind {
    /// Cluster identifier
    pub identifier: ClusterIdentifier,
    /// Human readable name
    pub name: &'static str,
    /// Attributes of the server side
    pub attributes: &'static [AttributeDefinition],
    /// Commands received by the server side
    pub server_commands: &'static [CommandDefinition],
    /// Commands sent by the server side
    pub client_commands: &'static [CommandDefinition],
}

/// Cluster without any known attributes or commands
pub static GENERIC: ClusterKind = ClusterKind {
    identifier: 0xffff,
    name: "Generic",
    attributes: &[],
    server_commands: &[],
    client_commands: &[],
};

impl ClusterKind {
    /// Attribute definition by identifier
    pub fn attribute(
        &self,
        identifier: AttributeIdentifier,
    ) -> Option<&'static AttributeDefinition> {
        self.attributes
            .iter()
            .find(|attribute| attribute.identifier == identifier)
    }

    /// Attribute definition by name
    pub fn attribute_by_name(&self, name: &str) -> Option<&'static AttributeDefinition> {
        self.attributes.iter().find(|attribute| attribute.name == name)
    }

    /// Commands travelling in the given direction
    pub fn commands(&self, direction: Direction) -> &'static [CommandDefinition] {
        match direction {
            Direction::ToServer => self.server_commands,
            Direction::ToClient => self.client_commands,
        }
    }

    /// Command definition by direction and identifier
    pub fn command(
        &self,
        direction: Direction,
        identifier: u8,
    ) -> Option<&'static CommandDefinition> {
        self.commands(direction)
            .iter()
            .find(|command| command.identifier == identifier)
    }

    /// Server command definition by name
    pub fn server_command_by_name(&self, name: &str) -> Option<&'static CommandDefinition> {
        self.server_commands
            .iter()
            .find(|command| command.name == name)
    }
}

/// Cluster kinds by identifier
///
/// Built once at start up and then shared, usually behind an `Arc`.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    kinds: HashMap<ClusterIdentifier, &'static ClusterKind>,
}

impl Registry {
    /// Create a empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every cluster kind of this crate
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for kind in clusters::ALL.iter().copied() {
            registry.register(kind);
        }
        registry
    }

    /// Add a cluster kind, returning the kind it replaced
    pub fn register(&mut self, kind: &'static ClusterKind) -> Option<&'static ClusterKind> {
        self.kinds.insert(kind.identifier, kind)
    }

    /// Registered kind for a cluster identifier
    pub fn get(&self, identifier: ClusterIdentifier) -> Option<&'static ClusterKind> {
        self.kinds.get(&identifier).copied()
    }

    /// Registered kind for a cluster identifier, the generic kind if there
    /// is none
    pub fn resolve(&self, identifier: ClusterIdentifier) -> &'static ClusterKind {
        self.get(identifier).unwrap_or(&GENERIC)
    }

    /// Number of registered kinds
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Check if no kind is registered
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use melis_data::cluster_library::AttributeDataType;

    static VENDOR: ClusterKind = ClusterKind {
        identifier: 0xfc00,
        name: "Vendor",
        attributes: &[AttributeDefinition::new(
            0x0000,
            "mode",
            AttributeDataType::Enumeration8,
        )],
        server_commands: &[],
        client_commands: &[],
    };

    #[test]
    fn default_kinds() {
        let registry = Registry::with_defaults();
        assert_eq!(registry.len(), clusters::ALL.len());
        let on_off = registry.get(0x0006).unwrap();
        assert_eq!(on_off.name, "On/Off");
        assert_eq!(
            on_off.server_command_by_name("toggle").unwrap().identifier,
            0x02
        );
        assert!(registry.get(0xfc00).is_none());
    }

    #[test]
    fn resolve_unknown_to_generic() {
        let registry = Registry::with_defaults();
        let kind = registry.resolve(0xfc00);
        assert_eq!(kind, &GENERIC);
        assert!(kind.attributes.is_empty());
        assert!(kind.command(Direction::ToServer, 0).is_none());
    }

    #[test]
    fn register_kind() {
        let mut registry = Registry::with_defaults();
        assert!(registry.register(&VENDOR).is_none());
        let kind = registry.resolve(0xfc00);
        assert_eq!(kind.name, "Vendor");
        assert_eq!(kind.attribute_by_name("mode").unwrap().identifier, 0);
        assert_eq!(registry.register(&VENDOR), Some(&VENDOR));
    }

    #[test]
    fn unique_identifiers() {
        for kind in clusters::ALL {
            for (index, attribute) in kind.attributes.iter().enumerate() {
                assert!(
                    kind.attributes[index + 1..]
                        .iter()
                        .all(|other| other.identifier != attribute.identifier),
                    "{} attribute 0x{:04x}",
                    kind.name,
                    attribute.identifier
                );
            }
            for commands in [kind.server_commands, kind.client_commands] {
                for (index, command) in commands.iter().enumerate() {
                    assert!(
                        commands[index + 1..]
                            .iter()
                            .all(|other| other.identifier != command.identifier),
                        "{} command 0x{:02x}",
                        kind.name,
                        command.identifier
                    );
                }
            }
        }
    }
}
