//! XML namespace registry for metadata standards.
//!
//! The writer declares its namespaces and `xsi:schemaLocation` pairs on the
//! root element from a [`NamespaceRegistry`]; the reader matches elements
//! against the URI constants directly. The registry preserves declaration
//! order so the root attributes are reproduced byte-identically on every
//! encode.

/// ISO 19115 geographic metadata namespace.
pub const NS_GMD: &str = "http://www.isotc211.org/2005/gmd";

/// ISO 19115 geographic common objects namespace.
pub const NS_GCO: &str = "http://www.isotc211.org/2005/gco";

/// ISO 19115 geographic metadata XML namespace (Anchor and code lists).
pub const NS_GMX: &str = "http://www.isotc211.org/2005/gmx";

/// Geography Markup Language namespace.
pub const NS_GML: &str = "http://www.opengis.net/gml/3.2";

/// XLink namespace.
pub const NS_XLINK: &str = "http://www.w3.org/1999/xlink";

/// XML Schema instance namespace.
pub const NS_XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// A single namespace declaration.
///
/// A namespace is either bound to a prefix or declared as the document's
/// default (unprefixed) namespace. ISO 19115 documents prefix every
/// namespace; standards such as route-exchange formats use a default
/// namespace on the root element instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Namespace {
    /// A namespace bound to a prefix (`xmlns:gmd="..."`).
    Prefixed {
        /// The prefix, without the trailing colon
        prefix: String,
        /// The namespace URI
        uri: String,
    },
    /// The default namespace (`xmlns="..."`).
    Default {
        /// The namespace URI
        uri: String,
    },
}

impl Namespace {
    /// Creates a prefixed namespace declaration.
    pub fn prefixed(prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        Namespace::Prefixed {
            prefix: prefix.into(),
            uri: uri.into(),
        }
    }

    /// Creates a default namespace declaration.
    pub fn default_ns(uri: impl Into<String>) -> Self {
        Namespace::Default { uri: uri.into() }
    }

    /// Returns the namespace URI.
    pub fn uri(&self) -> &str {
        match self {
            Namespace::Prefixed { uri, .. } => uri,
            Namespace::Default { uri } => uri,
        }
    }

    /// Returns the `xmlns` attribute name for this declaration.
    pub fn xmlns_attribute(&self) -> String {
        match self {
            Namespace::Prefixed { prefix, .. } => format!("xmlns:{}", prefix),
            Namespace::Default { .. } => "xmlns".to_string(),
        }
    }
}

/// Declaration-ordered namespace registry for one metadata standard.
#[derive(Debug, Clone, Default)]
pub struct NamespaceRegistry {
    namespaces: Vec<Namespace>,
    /// (namespace URI, schema location URL) pairs, in declaration order
    schema_locations: Vec<(String, String)>,
}

impl NamespaceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a namespace declaration.
    ///
    /// If the prefix (or default slot) is already registered, the existing
    /// mapping is preserved.
    pub fn add(&mut self, namespace: Namespace) {
        let exists = self.namespaces.iter().any(|ns| match (ns, &namespace) {
            (Namespace::Prefixed { prefix: a, .. }, Namespace::Prefixed { prefix: b, .. }) => {
                a == b
            }
            (Namespace::Default { .. }, Namespace::Default { .. }) => true,
            _ => false,
        });
        if !exists {
            self.namespaces.push(namespace);
        }
    }

    /// Adds a schema location for a namespace URI.
    pub fn add_schema_location(&mut self, uri: impl Into<String>, location: impl Into<String>) {
        self.schema_locations.push((uri.into(), location.into()));
    }

    /// Returns the `xmlns` attributes in declaration order.
    ///
    /// When `suppress_default` is set the default namespace is skipped.
    /// Decode-side query evaluation works on prefixed lookups only, so it
    /// never sees the bare `xmlns` form.
    pub fn xmlns_attributes(&self, suppress_default: bool) -> Vec<(String, String)> {
        self.namespaces
            .iter()
            .filter(|ns| !(suppress_default && matches!(ns, Namespace::Default { .. })))
            .map(|ns| (ns.xmlns_attribute(), ns.uri().to_string()))
            .collect()
    }

    /// Returns the `xsi:schemaLocation` attribute value.
    ///
    /// One `URI LOCATION` pair per declared schema location, separated by
    /// single spaces, in declaration order.
    pub fn schema_location(&self) -> String {
        self.schema_locations
            .iter()
            .flat_map(|(uri, loc)| [uri.as_str(), loc.as_str()])
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Returns an iterator over the declared namespaces.
    pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
        self.namespaces.iter()
    }

    /// The registry for ISO 19115 discovery metadata records.
    pub fn iso_19115() -> Self {
        let mut registry = Self::new();
        registry.add(Namespace::prefixed("gmd", NS_GMD));
        registry.add(Namespace::prefixed("gco", NS_GCO));
        registry.add(Namespace::prefixed("gml", NS_GML));
        registry.add(Namespace::prefixed("gmx", NS_GMX));
        registry.add(Namespace::prefixed("xlink", NS_XLINK));
        registry.add(Namespace::prefixed("xsi", NS_XSI));
        registry.add_schema_location(
            NS_GMD,
            "https://standards.iso.org/iso/19115/-2/gmi/1.0/gmi.xsd",
        );
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xmlns_attributes_order() {
        let registry = NamespaceRegistry::iso_19115();
        let attrs = registry.xmlns_attributes(false);
        assert_eq!(attrs[0], ("xmlns:gmd".to_string(), NS_GMD.to_string()));
        assert_eq!(attrs[1], ("xmlns:gco".to_string(), NS_GCO.to_string()));
        assert_eq!(attrs.len(), 6);
    }

    #[test]
    fn test_default_namespace_suppression() {
        let mut registry = NamespaceRegistry::new();
        registry.add(Namespace::default_ns("http://example.org/rtz"));
        registry.add(Namespace::prefixed("xsi", NS_XSI));

        assert_eq!(registry.xmlns_attributes(false).len(), 2);
        let suppressed = registry.xmlns_attributes(true);
        assert_eq!(suppressed.len(), 1);
        assert_eq!(suppressed[0].0, "xmlns:xsi");
    }

    #[test]
    fn test_duplicate_prefix_preserved() {
        let mut registry = NamespaceRegistry::new();
        registry.add(Namespace::prefixed("gmd", NS_GMD));
        registry.add(Namespace::prefixed("gmd", "http://example.org/other"));
        let attrs = registry.xmlns_attributes(false);
        assert_eq!(attrs, vec![("xmlns:gmd".to_string(), NS_GMD.to_string())]);
    }

    #[test]
    fn test_schema_location_pairs() {
        let mut registry = NamespaceRegistry::new();
        registry.add_schema_location("http://a", "http://a.xsd");
        registry.add_schema_location("http://b", "http://b.xsd");
        assert_eq!(registry.schema_location(), "http://a http://a.xsd http://b http://b.xsd");
    }
}
