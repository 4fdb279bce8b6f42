//! Dependency ordering of tables
//!
//! A table depends on every other table its foreign keys target. Tables are
//! emitted with Kahn's algorithm over that graph; the ready set is kept
//! sorted by `(schema name, table name)` so the order is a pure function of
//! the model. Tables caught in a cycle are appended at the end in the same
//! sort order.

use ddlforge_model::{Model, Table};
use std::collections::{BTreeSet, HashMap};

/// Result of ordering the tables of a model
#[derive(Debug, Clone, Default)]
pub struct TableOrder<'a> {
    /// Every table, dependencies first
    pub tables: Vec<&'a Table>,

    /// Number of leading tables whose dependencies were all emitted before them
    pub resolved: usize,
}

impl<'a> TableOrder<'a> {
    /// Tables that were left over after the traversal because of a cycle
    pub fn cyclic(&self) -> &[&'a Table] {
        &self.tables[self.resolved..]
    }

    pub fn has_cycles(&self) -> bool {
        self.resolved < self.tables.len()
    }
}

/// Sort key: schema name, table name, then position in the model for ties
type SortKey<'a> = (&'a str, &'a str, usize);

fn sort_key<'a>(model: &'a Model, index: usize, table: &'a Table) -> SortKey<'a> {
    (model.schema_name_of(table), table.name.as_str(), index)
}

/// Order the tables of `model` so referenced tables come first
pub fn dependency_order(model: &Model) -> TableOrder<'_> {
    let tables = &model.tables;
    let index_of: HashMap<&str, usize> = tables
        .iter()
        .enumerate()
        .map(|(i, t)| (t.id.as_str(), i))
        .collect();

    // dependents[b] lists the tables that reference b
    let mut dependents: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); tables.len()];
    let mut pending = vec![0usize; tables.len()];

    for (i, table) in tables.iter().enumerate() {
        let targets: BTreeSet<usize> = table
            .foreign_keys
            .iter()
            .filter_map(|fk| index_of.get(fk.to_table_id.as_str()).copied())
            .filter(|&target| target != i)
            .collect();
        for target in targets {
            dependents[target].insert(i);
            pending[i] += 1;
        }
    }

    let mut ready: BTreeSet<SortKey<'_>> = tables
        .iter()
        .enumerate()
        .filter(|(i, _)| pending[*i] == 0)
        .map(|(i, t)| sort_key(model, i, t))
        .collect();

    let mut emitted = vec![false; tables.len()];
    let mut ordered: Vec<&Table> = Vec::with_capacity(tables.len());

    while let Some(key) = ready.pop_first() {
        let (_, _, index) = key;
        emitted[index] = true;
        ordered.push(&tables[index]);

        for &dependent in &dependents[index] {
            pending[dependent] -= 1;
            if pending[dependent] == 0 {
                ready.insert(sort_key(model, dependent, &tables[dependent]));
            }
        }
    }

    let resolved = ordered.len();
    let mut leftover: Vec<SortKey<'_>> = tables
        .iter()
        .enumerate()
        .filter(|(i, _)| !emitted[*i])
        .map(|(i, t)| sort_key(model, i, t))
        .collect();
    leftover.sort();
    ordered.extend(leftover.into_iter().map(|(_, _, i)| &tables[i]));

    TableOrder {
        tables: ordered,
        resolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddlforge_model::{Column, ForeignKey, Schema};
    use pretty_assertions::assert_eq;

    fn table(schema: &Schema, name: &str) -> Table {
        Table::new(&schema.id, name).with_column(Column::new("id", "uuid").primary_key())
    }

    fn link(from: Table, to: &Table) -> Table {
        let column = Column::new(format!("{}_id", to.name), "uuid");
        let fk = ForeignKey::new(
            format!("fk_{}_{}", from.name, to.name),
            column.id.clone(),
            to.id.clone(),
            to.columns[0].id.clone(),
        );
        from.with_column(column).with_foreign_key(fk)
    }

    fn names(order: &TableOrder<'_>) -> Vec<String> {
        order.tables.iter().map(|t| t.name.clone()).collect()
    }

    #[test]
    fn test_chain_is_ordered_by_dependency() {
        let public = Schema::new("public");
        let a = table(&public, "a");
        let b = link(table(&public, "b"), &a);
        let c = link(table(&public, "c"), &b);
        let model = Model::empty()
            .with_schema(public)
            .with_table(c)
            .with_table(b)
            .with_table(a);

        let order = dependency_order(&model);
        assert_eq!(names(&order), vec!["a", "b", "c"]);
        assert!(!order.has_cycles());
    }

    #[test]
    fn test_dependency_beats_name_order() {
        let public = Schema::new("public");
        let zebra = table(&public, "zebra");
        let apple = link(table(&public, "apple"), &zebra);
        let mango = table(&public, "mango");
        let model = Model::empty()
            .with_schema(public)
            .with_table(apple)
            .with_table(mango)
            .with_table(zebra);

        assert_eq!(names(&dependency_order(&model)), vec!["mango", "zebra", "apple"]);
    }

    #[test]
    fn test_ready_tables_sorted_by_schema_then_name() {
        let public = Schema::new("public");
        let audit = Schema::new("audit");
        let model = Model::empty()
            .with_table(table(&public, "b"))
            .with_table(table(&public, "a"))
            .with_table(table(&audit, "z"))
            .with_schema(public)
            .with_schema(audit);

        assert_eq!(names(&dependency_order(&model)), vec!["z", "a", "b"]);
    }

    #[test]
    fn test_self_reference_and_missing_targets_ignored() {
        let public = Schema::new("public");
        let employees = table(&public, "employees");
        let employees = link(employees.clone(), &employees);
        let ghost = table(&public, "ghost");
        let orders = link(table(&public, "orders"), &ghost);
        let model = Model::empty()
            .with_schema(public)
            .with_table(orders)
            .with_table(employees);

        let order = dependency_order(&model);
        assert_eq!(names(&order), vec!["employees", "orders"]);
        assert!(!order.has_cycles());
    }

    #[test]
    fn test_cycle_appended_in_sorted_order() {
        let public = Schema::new("public");
        let mut x = table(&public, "x");
        let y = link(table(&public, "y"), &x);
        x = link(x, &y);
        let w = link(table(&public, "w"), &x);
        let root = table(&public, "root");
        let model = Model::empty()
            .with_schema(public)
            .with_table(y)
            .with_table(w)
            .with_table(x)
            .with_table(root);

        let order = dependency_order(&model);
        assert_eq!(order.resolved, 1);
        assert!(order.has_cycles());
        assert_eq!(names(&order), vec!["root", "w", "x", "y"]);
        let cyclic: Vec<&str> = order.cyclic().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(cyclic, vec!["w", "x", "y"]);
    }

    #[test]
    fn test_multiple_foreign_keys_to_same_table() {
        let public = Schema::new("public");
        let users = table(&public, "users");
        let posts = link(link(table(&public, "posts"), &users), &users);
        let model = Model::empty()
            .with_schema(public)
            .with_table(posts)
            .with_table(users);

        let order = dependency_order(&model);
        assert_eq!(names(&order), vec!["users", "posts"]);
        assert!(!order.has_cycles());
    }
}
