//! Place tool: drops a node of the palette item's type at the pointer.

use diagramkit_core::{EntityId, ObjectId, Point, ToolError};

use super::{EditorIntent, Tool, ToolContext, ToolInput};
use crate::diagram::DiagramBlock;
use crate::scene::{BlockNode, CursorShape, PreviewNode};

#[derive(Debug, Clone, Default)]
pub struct PlaceTool {
    palette_item: Option<String>,
    shadow: Option<EntityId>,
    /// Palette item the current shadow was built for.
    shadow_item: Option<String>,
}

impl PlaceTool {
    pub fn new(palette_item: Option<String>) -> Self {
        Self {
            palette_item,
            shadow: None,
            shadow_item: None,
        }
    }

    pub fn palette_item(&self) -> Option<&str> {
        self.palette_item.as_deref()
    }

    pub fn set_palette_item(&mut self, item: Option<String>) {
        self.palette_item = item;
    }

    /// Changes the palette item and drops a shadow built for another item.
    pub fn change_palette_item(&mut self, ctx: &mut ToolContext<'_>, item: Option<String>) {
        if self.shadow.is_some() && self.shadow_item != item {
            self.release_shadow(ctx);
        }
        self.palette_item = item;
    }

    pub fn shadow(&self) -> Option<EntityId> {
        self.shadow
    }

    /// Creates or moves the preview shadow.
    fn show_shadow(&mut self, ctx: &mut ToolContext<'_>, at: Point) -> bool {
        if self.shadow.is_some() && self.shadow_item != self.palette_item {
            self.release_shadow(ctx);
        }
        let Some(item) = self.palette_item.as_deref() else {
            return false;
        };
        if let Some(id) = self.shadow {
            if let Some(PreviewNode::Shadow(node)) = ctx.canvas.preview_mut(id) {
                node.position = at;
                ctx.canvas.request_redraw();
                return true;
            }
        }

        let id = EntityId::ephemeral();
        let pictogram = ctx
            .design
            .as_deref()
            .and_then(|d| d.metamodel().node_type(item))
            .and_then(|t| ctx.pictograms.resolve(&t.pictogram))
            .cloned();
        let mut block = DiagramBlock::new(id, at);
        block.pictogram = pictogram;
        block.label = item.to_string();
        let node = BlockNode::new(&block, ctx.canvas.config());
        ctx.canvas.set_preview(id, PreviewNode::Shadow(node));
        ctx.canvas.set_cursor(CursorShape::Crosshair);
        self.shadow = Some(id);
        self.shadow_item = Some(item.to_string());
        true
    }

    fn release_shadow(&mut self, ctx: &mut ToolContext<'_>) {
        if let Some(id) = self.shadow.take() {
            ctx.canvas.remove_preview(id);
        }
        self.shadow_item = None;
        ctx.canvas.set_cursor(CursorShape::Arrow);
    }

    fn place(&self, ctx: &mut ToolContext<'_>, at: Point) -> Result<ObjectId, ToolError> {
        let item = self.palette_item.as_deref().ok_or(ToolError::NoPaletteItem)?;
        let count = ctx.design()?.snapshot().count_of_type(item);
        let name = format!("{}{}", item.to_lowercase(), count);
        let id = ctx.transact(|tx| tx.create_node_at(item, Some(name), at))?;
        tracing::info!("Placed {} node {} at ({:.1}, {:.1})", item, id, at.x, at.y);
        Ok(id)
    }
}

impl Tool for PlaceTool {
    fn name(&self) -> &str {
        "place"
    }

    fn input_began(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput) -> bool {
        self.show_shadow(ctx, input.design)
    }

    fn input_moved(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput) -> bool {
        self.show_shadow(ctx, input.design)
    }

    fn input_hover(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput) -> bool {
        self.show_shadow(ctx, input.design)
    }

    fn input_ended(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput) -> bool {
        let result = self.place(ctx, input.design);
        self.release_shadow(ctx);
        match result {
            Ok(id) => {
                ctx.selection.replace_all([EntityId::Object(id)]);
                if ctx.canvas.config().tools.return_to_default_after_place {
                    ctx.intent(EditorIntent::SwitchToDefaultTool);
                }
                true
            }
            Err(err) => {
                ctx.report(self.name(), &err);
                false
            }
        }
    }

    fn input_cancelled(&mut self, ctx: &mut ToolContext<'_>) -> bool {
        let active = self.shadow.is_some();
        self.release_shadow(ctx);
        active
    }
}
