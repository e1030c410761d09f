use crate::{
    error::{DropReason, RenderResult},
    renderer::{Render, Renderer},
};
use sql_ast::{
    NodeId,
    kinds::{
        AlterTable, AlterTableAddColumn, AlterTableAlterColumn, AlterTableChangeOwner,
        AlterTableDropColumn, AlterTableRename,
    },
};

/// `ALTER TABLE name` followed by its actions, one per indented line.
impl Render for AlterTable {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let name = r.required(id, "name", self.name)?;
        r.keyword(if self.only { "ALTER TABLE ONLY " } else { "ALTER TABLE " });
        r.accept(name)?;
        r.indented(|r| {
            for (i, item) in self.items.iter().enumerate() {
                if i > 0 {
                    r.print(",");
                }
                r.newline();
                r.accept(*item)?;
            }
            Ok(())
        })
    }
}

impl Render for AlterTableAddColumn {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        r.required(id, "columns", self.columns.first().copied())?;
        r.keyword("ADD COLUMN ");
        r.join(&self.columns, ", ")
    }
}

impl Render for AlterTableDropColumn {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        r.required(id, "columns", self.columns.first().copied())?;
        r.keyword("DROP COLUMN ");
        if self.if_exists {
            r.keyword("IF EXISTS ");
        }
        r.join(&self.columns, ", ")?;
        if self.cascade {
            r.keyword(" CASCADE");
        }
        Ok(())
    }
}

impl Render for AlterTableAlterColumn {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        alter_column(r, id, self, false)
    }
}

/// Prints only the actions that are set. With an origin column the
/// statement is a `CHANGE COLUMN old new type` rename. `using` says
/// whether the dialect accepts a `USING expr` conversion.
pub fn alter_column(r: &mut Renderer<'_>, id: NodeId, x: &AlterTableAlterColumn, using: bool) -> RenderResult {
    if let Some(origin) = x.origin_column {
        let column = r.required(id, "column", x.column)?;
        r.keyword("CHANGE COLUMN ");
        r.accept(origin)?;
        r.print(" ");
        r.accept(column)?;
        if let Some(data_type) = x.data_type {
            r.print(" ");
            r.accept(data_type)?;
        }
    } else {
        r.keyword("ALTER COLUMN");
        if let Some(column) = x.column {
            r.print(" ");
            r.accept(column)?;
        }
        if let Some(data_type) = x.data_type {
            r.keyword(" SET DATA TYPE ");
            r.accept(data_type)?;
        }
    }

    if x.set_not_null {
        r.keyword(" SET NOT NULL");
    }
    if x.drop_not_null {
        r.keyword(" DROP NOT NULL");
    }
    if let Some(default) = x.set_default {
        r.keyword(" SET DEFAULT ");
        r.accept(default)?;
    }
    if x.drop_default {
        r.keyword(" DROP DEFAULT");
    }
    if x.first || x.to_first {
        r.keyword(" FIRST");
    }
    if let Some(after) = x.after {
        r.keyword(" AFTER ");
        r.accept(after)?;
    }

    if let Some(expr) = x.using {
        if using {
            r.keyword(" USING ");
            r.accept(expr)?;
        } else {
            r.drop_clause(id, "using", DropReason::NoEquivalent)?;
        }
    }
    Ok(())
}

impl Render for AlterTableRename {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let to = r.required(id, "to", self.to)?;
        r.keyword("RENAME TO ");
        r.accept(to)
    }
}

impl Render for AlterTableChangeOwner {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let owner = r.required(id, "owner", self.owner)?;
        r.keyword("OWNER TO ");
        r.accept(owner)
    }
}
