//! Property test: an in-memory tree agrees with a plain map model under
//! arbitrary sequences of create/overwrite/delete.

use ngsetup_tree::VirtualTree;
use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
enum Op {
    Create(String, String),
    Overwrite(String, String),
    Delete(String),
}

fn path_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "package.json".to_string(),
        "angular.json".to_string(),
        ".prettierrc.json".to_string(),
        "lefthook.yml".to_string(),
        "karma.conf.js".to_string(),
    ])
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let content = "[a-z]{0,8}";
    prop_oneof![
        (path_strategy(), content).prop_map(|(p, c)| Op::Create(p, c)),
        (path_strategy(), content).prop_map(|(p, c)| Op::Overwrite(p, c)),
        path_strategy().prop_map(Op::Delete),
    ]
}

proptest! {
    #[test]
    fn staged_ops_match_map_model(ops in prop::collection::vec(op_strategy(), 1..48)) {
        let mut tree = VirtualTree::in_memory();
        let mut model: BTreeMap<String, String> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Create(path, content) => {
                    let result = tree.create(&path, content.clone());
                    if model.contains_key(&path) {
                        prop_assert!(result.is_err());
                    } else {
                        prop_assert!(result.is_ok());
                        model.insert(path, content);
                    }
                }
                Op::Overwrite(path, content) => {
                    let result = tree.overwrite(&path, content.clone());
                    if model.contains_key(&path) {
                        prop_assert!(result.is_ok());
                        model.insert(path, content);
                    } else {
                        prop_assert!(result.is_err());
                    }
                }
                Op::Delete(path) => {
                    let result = tree.delete(&path);
                    if model.remove(&path).is_some() {
                        prop_assert!(result.is_ok());
                    } else {
                        prop_assert!(result.is_err());
                    }
                }
            }
        }

        for (path, content) in &model {
            prop_assert!(tree.exists(path));
            prop_assert_eq!(&tree.read(path).unwrap(), content);
        }
    }
}
