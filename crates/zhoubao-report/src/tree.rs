use crate::fragment::{section, Chain, Fragment};
use serde::Serialize;

/// A node of the document tree: one fragment's text plus the grouped
/// remainders of every chain that shared the prefix down to here.
/// Siblings always have distinct text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub text: String,
    pub children: Vec<TreeNode>,
}

/// Merge chains into a document tree by grouping shared fragment prefixes.
///
/// At each depth, chains whose head fragment renders the same text share a
/// node; their remainders are grouped recursively. Sibling order is
/// first-seen order over the input. The pass never mutates the chains, so
/// the two chains of an in-progress row stay independent.
pub fn merge_chains(chains: &[Chain]) -> Vec<TreeNode> {
    let suffixes: Vec<&[Fragment]> = chains.iter().map(|c| c.as_slice()).collect();
    merge_level(&suffixes)
}

fn merge_level(chains: &[&[Fragment]]) -> Vec<TreeNode> {
    let mut groups: Vec<(String, Vec<&[Fragment]>)> = Vec::new();
    for chain in chains {
        let Some((head, rest)) = chain.split_first() else {
            continue;
        };
        match groups.iter_mut().find(|(text, _)| *text == head.text) {
            Some((_, tails)) => {
                if !rest.is_empty() {
                    tails.push(rest);
                }
            }
            None => {
                let tails = if rest.is_empty() { vec![] } else { vec![rest] };
                groups.push((head.text.clone(), tails));
            }
        }
    }
    groups
        .into_iter()
        .map(|(text, tails)| TreeNode {
            text,
            children: merge_level(&tails),
        })
        .collect()
}

/// Put the this-week section first. Merge order is first-seen, so a report
/// whose first surviving chain was a next-week one comes out reversed.
/// With a single section (or none) there is nothing to reorder.
pub fn normalize_sections(mut roots: Vec<TreeNode>) -> Vec<TreeNode> {
    if roots.len() == 2 && roots[0].text != section::THIS_WEEK {
        roots.swap(0, 1);
    }
    roots
}

/// Pre-order depth-first concatenation. Fragments end with their own line
/// breaks, so no separators are added.
pub fn flatten(roots: &[TreeNode]) -> String {
    let mut out = String::new();
    for root in roots {
        flatten_into(root, &mut out);
    }
    out
}

fn flatten_into(node: &TreeNode, out: &mut String) {
    out.push_str(&node.text);
    for child in &node.children {
        flatten_into(child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::{Bucket, FragmentKind};

    fn frag(text: &str) -> Fragment {
        Fragment {
            kind: FragmentKind::DetailBullet,
            text: text.to_string(),
        }
    }

    fn chain(texts: &[&str]) -> Chain {
        texts.iter().map(|t| frag(t)).collect()
    }

    #[test]
    fn chains_sharing_a_prefix_share_nodes() {
        let chains = vec![
            chain(&["A\n", "B\n", "c1\n"]),
            chain(&["A\n", "B\n", "c2\n"]),
            chain(&["A\n", "X\n", "c3\n"]),
        ];
        let tree = merge_chains(&chains);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].text, "A\n");
        assert_eq!(tree[0].children.len(), 2);
        assert_eq!(tree[0].children[0].text, "B\n");
        assert_eq!(tree[0].children[0].children.len(), 2);
        assert_eq!(tree[0].children[1].text, "X\n");
    }

    #[test]
    fn sibling_order_is_first_seen() {
        let chains = vec![
            chain(&["A\n", "later\n"]),
            chain(&["A\n", "earlier\n"]),
            chain(&["A\n", "later\n"]),
        ];
        let tree = merge_chains(&chains);
        let kids: Vec<&str> = tree[0].children.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(kids, vec!["later\n", "earlier\n"]);
    }

    #[test]
    fn merge_is_shape_stable_under_input_reordering() {
        let a = chain(&["S\n", "r1\n", "t1\n", "d1\n"]);
        let b = chain(&["S\n", "r1\n", "t2\n", "d2\n"]);
        let c = chain(&["S\n", "r2\n", "t1\n", "d3\n"]);

        let forward = merge_chains(&[a.clone(), b.clone(), c.clone()]);
        let backward = merge_chains(&[c, b, a]);

        fn sorted_texts(nodes: &[TreeNode], out: &mut Vec<String>) {
            for n in nodes {
                out.push(n.text.clone());
                sorted_texts(&n.children, out);
            }
        }
        let mut f = Vec::new();
        let mut r = Vec::new();
        sorted_texts(&forward, &mut f);
        sorted_texts(&backward, &mut r);
        f.sort();
        r.sort();
        assert_eq!(f, r);
        assert_eq!(forward.len(), backward.len());
    }

    #[test]
    fn normalize_swaps_reversed_sections() {
        let chains = vec![
            vec![Fragment::section(Bucket::NextWeek), frag("b\n")],
            vec![Fragment::section(Bucket::ThisWeek), frag("a\n")],
        ];
        let tree = normalize_sections(merge_chains(&chains));
        assert_eq!(tree[0].text, section::THIS_WEEK);
        assert_eq!(tree[1].text, section::NEXT_WEEK);
    }

    #[test]
    fn normalize_leaves_single_section_alone() {
        let chains = vec![vec![Fragment::section(Bucket::NextWeek), frag("b\n")]];
        let tree = normalize_sections(merge_chains(&chains));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].text, section::NEXT_WEEK);

        assert!(normalize_sections(Vec::new()).is_empty());
    }

    #[test]
    fn flatten_emits_every_fragment_exactly_once() {
        let chains = vec![
            chain(&["A\n", "B\n", "c1\n"]),
            chain(&["A\n", "B\n", "c2\n"]),
            chain(&["D\n", "E\n", "c3\n"]),
        ];
        let out = flatten(&merge_chains(&chains));
        assert_eq!(out, "A\nB\nc1\nc2\nD\nE\nc3\n");

        // Every distinct fragment text appears exactly once.
        for text in ["A\n", "B\n", "c1\n", "c2\n", "D\n", "E\n", "c3\n"] {
            assert_eq!(out.matches(text.trim()).count(), 1, "{text:?}");
        }
    }

    #[test]
    fn empty_input_flattens_to_empty_document() {
        assert_eq!(flatten(&merge_chains(&[])), "");
    }
}
