use super::Gate;
use crate::rule::PromotionRule;
use std::fmt;

/// Renders a gate as a tree, resolving condition ids against the rule.
pub struct GateDisplay<'a> {
    pub gate: &'a Gate,
    pub rule: &'a PromotionRule,
}

impl fmt::Display for GateDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_as_tree(self.gate, f, "", true)
    }
}

impl GateDisplay<'_> {
    fn fmt_as_tree(
        &self,
        gate: &Gate,
        f: &mut fmt::Formatter<'_>,
        prefix: &str,
        is_last: bool,
    ) -> fmt::Result {
        let node_marker = if is_last { "└── " } else { "├── " };
        write!(f, "{}{}", prefix, node_marker)?;

        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });

        match gate {
            Gate::Condition(id) => match self.rule.condition(id) {
                Some(c) => writeln!(
                    f,
                    "{} {} {} [{}]",
                    c.condition_type.as_str(),
                    c.operator,
                    c.value,
                    id
                )?,
                None => writeln!(f, "<unknown condition {}>", id)?,
            },
            Gate::And(l, r) => self.fmt_children(f, "AND", &[&**l, &**r], &child_prefix)?,
            Gate::Or(l, r) => self.fmt_children(f, "OR", &[&**l, &**r], &child_prefix)?,
            Gate::All(gates) => {
                let children: Vec<&Gate> = gates.iter().collect();
                self.fmt_children(f, "ALL", &children, &child_prefix)?
            }
        }
        Ok(())
    }

    fn fmt_children(
        &self,
        f: &mut fmt::Formatter<'_>,
        name: &str,
        children: &[&Gate],
        prefix: &str,
    ) -> fmt::Result {
        writeln!(f, "{}", name)?;
        for (i, child) in children.iter().enumerate() {
            self.fmt_as_tree(child, f, prefix, i + 1 == children.len())?;
        }
        Ok(())
    }
}
