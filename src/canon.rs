use crate::counter::HndqCallCounter;
use crate::CanonicalizationError;
use base16ct::lower::encode_str;
use itertools::Itertools;
use oxrdf::{Dataset, GraphNameRef, Quad, SubjectRef, TermRef, Triple};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};

/// **4.3 Canonicalization State**
pub struct CanonicalizationState {
    /// **blank node to quads map**
    ///   A map that relates a blank node identifier to the quads
    ///   in which they appear in the input dataset.
    blank_node_to_quads_map: HashMap<String, Vec<Quad>>,

    /// **hash to blank nodes map**
    ///   A map that relates a hash to a list of blank node identifiers.
    hash_to_blank_node_map: BTreeMap<String, Vec<String>>,

    /// **canonical issuer**
    ///   An identifier issuer, initialized with the prefix c14n, for
    ///   issuing canonical blank node identifiers.
    canonical_issuer: IdentifierIssuer,
}

impl CanonicalizationState {
    const DEFAULT_CANONICAL_IDENTIFIER_PREFIX: &'static str = "c14n";

    fn new() -> CanonicalizationState {
        CanonicalizationState {
            blank_node_to_quads_map: HashMap::new(),
            hash_to_blank_node_map: BTreeMap::new(),
            canonical_issuer: IdentifierIssuer::new(Self::DEFAULT_CANONICAL_IDENTIFIER_PREFIX),
        }
    }

    fn update_blank_node_to_quads_map(&mut self, dataset: &Dataset) {
        for quad in dataset.iter() {
            if let SubjectRef::BlankNode(n) = quad.subject {
                self.blank_node_to_quads_map
                    .entry(n.as_str().to_string())
                    .or_default()
                    .push(quad.into_owned());
            }
            if let TermRef::BlankNode(n) = quad.object {
                self.blank_node_to_quads_map
                    .entry(n.as_str().to_string())
                    .or_default()
                    .push(quad.into_owned());
            }
            if let GraphNameRef::BlankNode(n) = quad.graph_name {
                self.blank_node_to_quads_map
                    .entry(n.as_str().to_string())
                    .or_default()
                    .push(quad.into_owned());
            }
        }
    }

    fn get_quads_for_blank_node(&self, identifier: &str) -> Option<&Vec<Quad>> {
        self.blank_node_to_quads_map.get(identifier)
    }
}

/// **4.4 Blank Node Identifier Issuer State**
/// During the canonicalization algorithm, it is sometimes necessary to issue new identifiers to
/// blank nodes. The Issue Identifier algorithm uses an identifier issuer to accomplish this task.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct IdentifierIssuer {
    /// The identifier prefix is a string that is used at the beginning of a blank node
    /// identifier. When generating a new blank node identifier, the prefix is concatenated
    /// with the identifier counter. For example, `c14n` is a proper initial value for the
    /// identifier prefix, producing blank node identifiers like `c14n1`.
    identifier_prefix: String,

    /// A counter that is appended to the identifier prefix to create a blank node identifier.
    /// It is initialized to 0.
    identifier_counter: usize,

    /// An ordered map that relates existing identifiers to issued identifiers, to prevent
    /// issuance of more than one new identifier per existing identifier, and to allow blank
    /// nodes to be reassigned identifiers some time after issuance.
    issued_identifiers_map: BTreeMap<String, String>,
}

impl IdentifierIssuer {
    pub fn new(identifier_prefix: &str) -> IdentifierIssuer {
        IdentifierIssuer {
            identifier_prefix: identifier_prefix.to_string(),
            identifier_counter: 0,
            issued_identifiers_map: BTreeMap::new(),
        }
    }

    fn increment(&mut self) {
        self.identifier_counter += 1
    }

    pub fn get(&self, existing_identifier: &str) -> Option<String> {
        self.issued_identifiers_map.get(existing_identifier).cloned()
    }

    /// **4.6 Issue Identifier Algorithm**
    ///   This algorithm issues a new blank node identifier for a given existing blank node
    ///   identifier. It also updates state information that tracks the order in which new
    ///   blank node identifiers were issued, which matters when canonically labeling blank
    ///   nodes that are isomorphic to others in the dataset.
    pub fn issue(&mut self, existing_identifier: &str) -> String {
        // 1) If there is a map entry for existing identifier, return it.
        if let Some(issued_identifier) = self.get(existing_identifier) {
            return issued_identifier;
        }

        // 2) Generate issued identifier by concatenating identifier prefix with the string
        // value of identifier counter.
        let issued_identifier = format!("{}{}", self.identifier_prefix, self.identifier_counter);

        // 3) Add an entry mapping existing identifier to issued identifier.
        self.issued_identifiers_map
            .insert(existing_identifier.to_string(), issued_identifier.clone());

        // 4) Increment identifier counter.
        self.increment();

        // 5) Return issued identifier.
        issued_identifier
    }

    /// Existing identifiers in the order their canonical labels were first issued.
    ///
    /// The backing map is keyed by *existing* identifier (so lookups stay cheap regardless of
    /// issuance order); the numeric suffix of each issued label is monotonic with issuance by
    /// construction (step 2 above), so sorting by that suffix recovers issuance order without
    /// a second map.
    fn issued_in_order(&self) -> Vec<String> {
        let mut entries: Vec<(&String, &String)> = self.issued_identifiers_map.iter().collect();
        entries.sort_by_key(|(_, issued)| {
            issued[self.identifier_prefix.len()..]
                .parse::<usize>()
                .unwrap_or(usize::MAX)
        });
        entries.into_iter().map(|(existing, _)| existing.clone()).collect()
    }
}

/// **hash**
///   The lowercase, hexadecimal representation of a message digest, computed with the `D`
///   digest algorithm selected by the enclosing `canonicalize_core::<D>` call.
fn hash<D: Digest>(data: impl AsRef<[u8]>) -> Result<String, CanonicalizationError> {
    let digest = D::digest(data);
    let mut buf = vec![0u8; digest.len() * 2];
    encode_str(&digest, &mut buf)
        .map(|h| h.to_string())
        .map_err(CanonicalizationError::Base16EncodingFailed)
}

/// Serializes a quad as a single N-Quads line, terminated by `" .\n"`. `QuadRef`'s `Display`
/// already omits the graph name for default-graph quads; only the standalone `GraphName`
/// Display renders the non-syntactic literal string `DEFAULT`, which this never touches.
pub(crate) fn serialize_quad(quad: &Quad) -> String {
    format!("{} .\n", quad)
}

pub(crate) fn serialize_triple(triple: &Triple) -> String {
    format!("{} .\n", triple)
}

/// **4.7 Hash First Degree Quads**
///   Calculates a hash for a given blank node across the quads in a dataset in which that
///   blank node is a component. If the hash uniquely identifies that blank node, no further
///   examination is necessary; otherwise a hash is created using Hash N-Degree Quads, invoked
///   via the canonicalization algorithm.
fn hash_first_degree_quads<D: Digest>(
    state: &CanonicalizationState,
    reference_blank_node_identifier: &str,
) -> Result<String, CanonicalizationError> {
    // 2) Get the list of quads from the map entry for reference blank node identifier.
    let quads = state
        .get_quads_for_blank_node(reference_blank_node_identifier)
        .ok_or(CanonicalizationError::QuadsNotExist)?;

    // 3) For each quad, serialize it in N-Quads form with the special rule that any blank
    // node component is replaced by the sentinel identifier `a` (if it matches reference
    // blank node identifier) or `z` (otherwise).
    fn replace(value: &str, reference: &str) -> oxrdf::BlankNode {
        oxrdf::BlankNode::new_unchecked(if value == reference { "a" } else { "z" })
    }

    let mut nquads: Vec<String> = quads
        .iter()
        .map(|quad| {
            let subject = match &quad.subject {
                oxrdf::Subject::BlankNode(bnode) => {
                    oxrdf::Subject::BlankNode(replace(bnode.as_str(), reference_blank_node_identifier))
                }
                s => s.clone(),
            };
            let object = match &quad.object {
                oxrdf::Term::BlankNode(bnode) => {
                    oxrdf::Term::BlankNode(replace(bnode.as_str(), reference_blank_node_identifier))
                }
                o => o.clone(),
            };
            let graph_name = match &quad.graph_name {
                oxrdf::GraphName::BlankNode(bnode) => {
                    oxrdf::GraphName::BlankNode(replace(bnode.as_str(), reference_blank_node_identifier))
                }
                g => g.clone(),
            };
            serialize_quad(&Quad::new(subject, quad.predicate.clone(), object, graph_name))
        })
        .collect();

    // 4) Sort nquads in Unicode code point order.
    nquads.sort();

    // 5) Return the hash that results from passing the sorted and concatenated nquads through
    // the hash algorithm.
    hash::<D>(nquads.join(""))
}

enum HashRelatedBlankNodePosition {
    Subject,
    Object,
    Graph,
}
impl HashRelatedBlankNodePosition {
    fn serialize(&self) -> &str {
        match self {
            Self::Subject => "s",
            Self::Object => "o",
            Self::Graph => "g",
        }
    }
}

/// **4.8 Hash Related Blank Node**
///   Generates a hash for some blank node component of a quad, considering its position
///   within that quad. Used by Hash N-Degree Quads to characterize the blank nodes related
///   to some particular blank node within their mention sets.
fn hash_related_blank_node<D: Digest>(
    state: &CanonicalizationState,
    related: &str,
    quad: &Quad,
    issuer: &IdentifierIssuer,
    position: HashRelatedBlankNodePosition,
) -> Result<String, CanonicalizationError> {
    // 1) Initialize a string input to the value of position.
    // 2) If position is not g, append <, the value of the predicate in quad, and > to input.
    let input = match position {
        HashRelatedBlankNodePosition::Graph => position.serialize().to_string(),
        _ => format!("{}<{}>", position.serialize(), quad.predicate.as_str()),
    };

    // 3) If there is a canonical identifier for related, or an identifier issued by issuer,
    // append `_:`, followed by that identifier, to input. Otherwise append the result of the
    // Hash First Degree Quads algorithm, passing related.
    let identifier = match state.canonical_issuer.get(related) {
        Some(id) => format!("_:{id}"),
        None => match issuer.get(related) {
            Some(id) => format!("_:{id}"),
            None => hash_first_degree_quads::<D>(state, related)?,
        },
    };

    hash::<D>(format!("{input}{identifier}"))
}

#[derive(PartialEq, Eq, Debug)]
struct HashNDegreeQuadsResult {
    hash: String,
    issuer: IdentifierIssuer,
}

impl PartialOrd for HashNDegreeQuadsResult {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HashNDegreeQuadsResult {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.hash.cmp(&other.hash)
    }
}

/// **4.9 Hash N-Degree Quads**
///   Calculates a hash for a given blank node across the quads in a dataset in which that
///   blank node is a component for which the hash does not uniquely identify that blank node.
///   This expands the search from quads directly referencing that blank node (the mention
///   set) to quads containing nodes that are also components of quads in the mention set
///   (the gossip path), in increasing degrees of indirection, until a unique hash is obtained.
fn hash_n_degree_quads<D: Digest>(
    state: &CanonicalizationState,
    identifier: &str,
    path_identifier_issuer: &IdentifierIssuer,
    counter: &mut impl HndqCallCounter,
) -> Result<HashNDegreeQuadsResult, CanonicalizationError> {
    counter.add(identifier)?;

    let mut issuer = path_identifier_issuer.clone();

    // 1) Create a new map Hn for relating hashes to related blank nodes.
    let mut h_n = BTreeMap::<String, Vec<String>>::new();

    // 2) Get the list of quads from the map entry for identifier.
    let quads = state
        .get_quads_for_blank_node(identifier)
        .ok_or(CanonicalizationError::QuadsNotExist)?;

    // 3) For each quad, for each component that is a blank node not identified by identifier:
    for quad in quads {
        if let oxrdf::Subject::BlankNode(bnode) = &quad.subject {
            if bnode.as_str() != identifier {
                let h = hash_related_blank_node::<D>(
                    state,
                    bnode.as_str(),
                    quad,
                    &issuer,
                    HashRelatedBlankNodePosition::Subject,
                )?;
                h_n.entry(h).or_default().push(bnode.as_str().to_string());
            }
        }
        if let oxrdf::Term::BlankNode(bnode) = &quad.object {
            if bnode.as_str() != identifier {
                let h = hash_related_blank_node::<D>(
                    state,
                    bnode.as_str(),
                    quad,
                    &issuer,
                    HashRelatedBlankNodePosition::Object,
                )?;
                h_n.entry(h).or_default().push(bnode.as_str().to_string());
            }
        }
        if let oxrdf::GraphName::BlankNode(bnode) = &quad.graph_name {
            if bnode.as_str() != identifier {
                let h = hash_related_blank_node::<D>(
                    state,
                    bnode.as_str(),
                    quad,
                    &issuer,
                    HashRelatedBlankNodePosition::Graph,
                )?;
                h_n.entry(h).or_default().push(bnode.as_str().to_string());
            }
        }
    }

    // 4) Create an empty list, data to hash.
    let mut data_to_hash = Vec::<String>::new();

    // 5) For each related hash to blank node list mapping, code point ordered by related hash:
    for (related_hash, blank_node_list) in h_n {
        data_to_hash.push(related_hash);

        let mut chosen_path = String::new();
        let mut chosen_issuer = IdentifierIssuer::new("UNSET");

        // 5.4) For each permutation p of blank node list:
        'perm_loop: for p in blank_node_list.iter().permutations(blank_node_list.len()) {
            let mut issuer_copy = issuer.clone();
            let mut path_vec = Vec::<String>::new();
            let mut recursion_list = Vec::<&String>::new();

            // 5.4.4) For each related in p:
            for related in &p {
                if let Some(canonical_identifier) = state.canonical_issuer.get(related) {
                    path_vec.push(format!("_:{canonical_identifier}"));
                } else {
                    if issuer_copy.get(related).is_none() {
                        recursion_list.push(*related);
                    }
                    path_vec.push(format!("_:{}", issuer_copy.issue(related)));
                }

                let path = path_vec.join("");
                if !chosen_path.is_empty() && path.len() >= chosen_path.len() && path >= chosen_path
                {
                    continue 'perm_loop;
                }
            }

            // 5.4.5) For each related in recursion list:
            for related in recursion_list {
                let result = hash_n_degree_quads::<D>(state, related, &issuer_copy, counter)?;
                path_vec.push(format!("_:{}", issuer_copy.issue(related)));
                path_vec.push("<".to_string());
                path_vec.push(result.hash);
                path_vec.push(">".to_string());
                issuer_copy = result.issuer;

                let path = path_vec.join("");
                if !chosen_path.is_empty() && path.len() >= chosen_path.len() && path >= chosen_path
                {
                    continue 'perm_loop;
                }
            }

            // 5.4.6) If chosen path is empty or path is lexicographically smaller, adopt it.
            let path = path_vec.join("");
            if chosen_path.is_empty() || path < chosen_path {
                chosen_path = path;
                chosen_issuer = issuer_copy;
            }
        }

        data_to_hash.push(chosen_path);
        issuer = chosen_issuer;
    }

    // 6) Return issuer and the hash of data to hash.
    Ok(HashNDegreeQuadsResult {
        hash: hash::<D>(data_to_hash.join(""))?,
        issuer,
    })
}

/// **4.5 Canonicalization Algorithm**
///   Runs the full two-phase blank node labeling procedure and returns the issued-identifiers
///   map (existing blank node id -> canonical label). Generic over the hash algorithm `D` and
///   over the work-cap accounting strategy via the `counter` parameter.
pub fn canonicalize_core<D: Digest>(
    input_dataset: &Dataset,
    mut counter: impl HndqCallCounter,
) -> Result<HashMap<String, String>, CanonicalizationError> {
    let mut state = CanonicalizationState::new();
    state.update_blank_node_to_quads_map(input_dataset);

    let mut non_normalized: Vec<String> = state.blank_node_to_quads_map.keys().cloned().collect();
    non_normalized.sort();

    // Simple labeling loop: repeat while the previous iteration issued at least one canonical
    // label, since issuing a label can change a co-occurring node's first-degree hash via
    // hash_related_blank_node's canonical-issuer branch.
    loop {
        state.hash_to_blank_node_map.clear();
        for id in &non_normalized {
            let h = hash_first_degree_quads::<D>(&state, id)?;
            state.hash_to_blank_node_map.entry(h).or_default().push(id.clone());
        }

        let mut simple = false;
        let mut labeled = Vec::new();
        for identifier_list in state.hash_to_blank_node_map.values() {
            if identifier_list.len() != 1 {
                continue;
            }
            let identifier = &identifier_list[0];
            state.canonical_issuer.issue(identifier);
            labeled.push(identifier.clone());
            simple = true;
        }
        non_normalized.retain(|id| !labeled.contains(id));
        if !simple {
            break;
        }
    }

    // Complex labeling: for each remaining bucket (hash buckets of size > 1), in ascending
    // hash order, run N-degree hashing for every not-yet-canonical member, sort by hash, then
    // promote each entry's path issuer in the order its temporary labels were actually issued.
    let remaining_buckets: Vec<(String, Vec<String>)> = state
        .hash_to_blank_node_map
        .iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|(h, ids)| (h.clone(), ids.clone()))
        .collect();

    for (_hash, identifier_list) in remaining_buckets {
        let mut hash_path_list = Vec::<HashNDegreeQuadsResult>::new();
        for id in &identifier_list {
            if state.canonical_issuer.get(id).is_some() {
                continue;
            }
            let mut temporary_issuer = IdentifierIssuer::new("b");
            temporary_issuer.issue(id);
            let result = hash_n_degree_quads::<D>(&state, id, &temporary_issuer, &mut counter)?;
            hash_path_list.push(result);
        }
        hash_path_list.sort();

        for entry in hash_path_list {
            for existing in entry.issuer.issued_in_order() {
                state.canonical_issuer.issue(&existing);
            }
        }
    }

    Ok(state
        .canonical_issuer
        .issued_identifiers_map
        .into_iter()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::SimpleHndqCallCounter;
    use oxrdf::{BlankNode, GraphName, Literal, NamedNode, Quad, Term};

    fn bnode(id: &str) -> BlankNode {
        BlankNode::new_unchecked(id)
    }

    fn iri(v: &str) -> NamedNode {
        NamedNode::new_unchecked(v)
    }

    #[test]
    fn test_issue_identifier() {
        let mut canonical_issuer = IdentifierIssuer::new("c14n");
        assert_eq!(canonical_issuer.issue("b0"), "c14n0");
        assert_eq!(canonical_issuer.issue("b1"), "c14n1");
        assert_eq!(canonical_issuer.issue("b99"), "c14n2");
        assert_eq!(canonical_issuer.issue("xyz"), "c14n3");
        assert_eq!(canonical_issuer.issue("xyz"), "c14n3");
        assert_eq!(canonical_issuer.issue("b99"), "c14n2");
        assert_eq!(canonical_issuer.issue("b1"), "c14n1");
        assert_eq!(canonical_issuer.issue("b0"), "c14n0");
    }

    #[test]
    fn test_issued_in_order_tracks_issuance_not_key_order() {
        let mut issuer = IdentifierIssuer::new("b");
        issuer.issue("z"); // issued first despite sorting last as a map key
        issuer.issue("a");
        assert_eq!(
            issuer.issued_in_order(),
            vec!["z".to_string(), "a".to_string()]
        );
    }

    fn dataset_for_unique_hashes() -> Dataset {
        let e0 = bnode("e0");
        let e1 = bnode("e1");
        let p = iri("http://example.com/#p");
        Dataset::from_iter([
            Quad::new(p.clone(), iri("http://example.com/#q"), e0.clone(), GraphName::DefaultGraph),
            Quad::new(p, iri("http://example.com/#r"), e1.clone(), GraphName::DefaultGraph),
            Quad::new(e0, iri("http://example.com/#s"), iri("http://example.com/#u"), GraphName::DefaultGraph),
            Quad::new(e1, iri("http://example.com/#t"), iri("http://example.com/#u"), GraphName::DefaultGraph),
        ])
    }

    #[test]
    fn test_hash_first_degree_quads_unique_hashes() {
        let mut state = CanonicalizationState::new();
        state.update_blank_node_to_quads_map(&dataset_for_unique_hashes());

        let hash_e0 = hash_first_degree_quads::<Sha256>(&state, "e0").unwrap();
        let hash_e1 = hash_first_degree_quads::<Sha256>(&state, "e1").unwrap();
        assert_ne!(hash_e0, hash_e1);
        assert_eq!(hash_e0.len(), 64);
    }

    #[test]
    fn test_hash_first_degree_quads_shared_hashes() {
        let mut state = CanonicalizationState::new();
        let p = iri("http://example.com/#p");
        let q = iri("http://example.com/#q");
        let r = iri("http://example.com/#r");
        let e0 = bnode("e0");
        let e1 = bnode("e1");
        let e2 = bnode("e2");
        let e3 = bnode("e3");
        let dataset = Dataset::from_iter([
            Quad::new(p.clone(), q.clone(), e0.clone(), GraphName::DefaultGraph),
            Quad::new(p.clone(), q, e1.clone(), GraphName::DefaultGraph),
            Quad::new(e0.clone(), p.clone(), e2.clone(), GraphName::DefaultGraph),
            Quad::new(e1.clone(), p, e3.clone(), GraphName::DefaultGraph),
            Quad::new(e2, r, e3, GraphName::DefaultGraph),
        ]);
        state.update_blank_node_to_quads_map(&dataset);

        let hash_e0 = hash_first_degree_quads::<Sha256>(&state, "e0").unwrap();
        let hash_e1 = hash_first_degree_quads::<Sha256>(&state, "e1").unwrap();
        assert_eq!(hash_e0, hash_e1);
    }

    #[test]
    fn test_hash_related_blank_node_differs_by_position() {
        let mut state = CanonicalizationState::new();
        state
            .canonical_issuer
            .issued_identifiers_map
            .insert("e2".to_string(), "c14n0".to_string());
        let issuer = IdentifierIssuer::new("b");
        let e0 = bnode("e0");
        let e2 = bnode("e2");
        let p = iri("http://example.com/#p");
        let quad = Quad::new(e0, p, e2, GraphName::DefaultGraph);

        let as_object = hash_related_blank_node::<Sha256>(
            &state,
            "e2",
            &quad,
            &issuer,
            HashRelatedBlankNodePosition::Object,
        )
        .unwrap();
        let as_subject = hash_related_blank_node::<Sha256>(
            &state,
            "e2",
            &quad,
            &issuer,
            HashRelatedBlankNodePosition::Subject,
        )
        .unwrap();
        assert_ne!(as_object, as_subject);
    }

    #[test]
    fn test_canonicalize_core_symmetric_pair_gets_distinct_labels() {
        let a = bnode("a");
        let b = bnode("b");
        let knows = iri("http://example.com/knows");
        let dataset = Dataset::from_iter([
            Quad::new(a.clone(), knows.clone(), b.clone(), GraphName::DefaultGraph),
            Quad::new(b, knows, a, GraphName::DefaultGraph),
        ]);

        let counter = SimpleHndqCallCounter::new(None);
        let map = canonicalize_core::<Sha256>(&dataset, counter).unwrap();
        assert_eq!(map.len(), 2);
        let mut labels: Vec<&String> = map.values().collect();
        labels.sort();
        assert_eq!(labels, vec!["c14n0", "c14n1"]);
    }

    #[test]
    fn test_canonicalize_core_empty_dataset() {
        let dataset = Dataset::new();
        let counter = SimpleHndqCallCounter::new(None);
        let map = canonicalize_core::<Sha256>(&dataset, counter).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_canonicalize_core_no_blank_nodes() {
        let dataset = Dataset::from_iter([Quad::new(
            iri("http://ex/s"),
            iri("http://ex/p"),
            iri("http://ex/o"),
            GraphName::DefaultGraph,
        )]);
        let counter = SimpleHndqCallCounter::new(None);
        let map = canonicalize_core::<Sha256>(&dataset, counter).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_serialize_quad_omits_default_graph() {
        let quad = Quad::new(
            bnode("e0"),
            iri("http://example.org/vocab#p"),
            Term::Literal(Literal::new_simple_literal("v")),
            GraphName::DefaultGraph,
        );
        assert_eq!(
            serialize_quad(&quad),
            "_:e0 <http://example.org/vocab#p> \"v\" .\n"
        );
    }

    #[test]
    fn test_serialize_quad_includes_named_graph() {
        let quad = Quad::new(
            bnode("e0"),
            iri("http://example.org/vocab#p"),
            bnode("e1"),
            bnode("g"),
        );
        assert_eq!(
            serialize_quad(&quad),
            "_:e0 <http://example.org/vocab#p> _:e1 _:g .\n"
        );
    }

    #[test]
    fn test_clique_exceeds_zero_call_limit() {
        // Three mutually-linked blank nodes share a first-degree hash and force at least one
        // hash_n_degree_quads call during complex labeling.
        let knows = iri("http://example.com/knows");
        let a = bnode("a");
        let b = bnode("b");
        let c = bnode("c");
        let dataset = Dataset::from_iter([
            Quad::new(a.clone(), knows.clone(), b.clone(), GraphName::DefaultGraph),
            Quad::new(b.clone(), knows.clone(), c.clone(), GraphName::DefaultGraph),
            Quad::new(c, knows, a, GraphName::DefaultGraph),
        ]);

        let counter = SimpleHndqCallCounter::new(Some(0));
        let result = canonicalize_core::<Sha256>(&dataset, counter);
        assert!(matches!(
            result,
            Err(CanonicalizationError::HndqCallLimitExceeded(0))
        ));
    }
}
