pub mod mod_tree;
