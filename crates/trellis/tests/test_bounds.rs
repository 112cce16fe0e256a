//! Integration tests for bounds resolution.

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use trellis::{
        Anchor, Error, EventKind, NodeConfig, NodeKind, Result, Ui,
        geom::{Edges, Rect, Size},
    };

    fn ui() -> Ui {
        Ui::new(Size::new(800.0, 600.0))
    }

    #[test]
    fn root_uses_local_position_and_size() -> Result<()> {
        let mut ui = ui();
        let root = ui.create_root(&NodeConfig::new(NodeKind::Panel).rect(10.0, 20.0, 200.0, 100.0))?;
        assert_eq!(ui.bounds_of(root)?, Rect::new(10.0, 20.0, 200.0, 100.0));
        Ok(())
    }

    #[test]
    fn anchors_resolve_inside_parent_content() -> Result<()> {
        let mut ui = ui();
        let root = ui.create_root(
            &NodeConfig::new(NodeKind::Container)
                .rect(10.0, 20.0, 200.0, 100.0)
                .padding(Edges::uniform(10.0)),
        )?;
        assert_eq!(ui.content_bounds(root)?, Rect::new(20.0, 30.0, 180.0, 80.0));

        let centered = ui.create_child(
            root,
            &NodeConfig::new(NodeKind::Panel)
                .size(50.0, 20.0)
                .anchor(Anchor::Center),
        )?;
        assert_eq!(ui.bounds_of(centered)?, Rect::new(85.0, 60.0, 50.0, 20.0));

        let corner = ui.create_child(
            root,
            &NodeConfig::new(NodeKind::Panel)
                .rect(99.0, 99.0, 30.0, 10.0)
                .anchor(Anchor::BottomRight),
        )?;
        // Non top-left anchors ignore the local offset.
        assert_eq!(ui.bounds_of(corner)?, Rect::new(170.0, 100.0, 30.0, 10.0));
        Ok(())
    }

    #[test]
    fn margin_shrinks_the_placed_rect() -> Result<()> {
        let mut ui = ui();
        let root = ui.create_root(&NodeConfig::new(NodeKind::Panel).size(100.0, 100.0))?;
        let child = ui.create_child(
            root,
            &NodeConfig::new(NodeKind::Panel)
                .rect(10.0, 10.0, 50.0, 20.0)
                .margin(Edges::uniform(5.0)),
        )?;
        assert_eq!(ui.bounds_of(child)?, Rect::new(15.0, 15.0, 40.0, 10.0));

        // Margins larger than the node collapse it to zero size.
        ui.set_margin(child, Edges::uniform(40.0))?;
        let b = ui.bounds_of(child)?;
        assert_eq!(b.size(), Size::zero());
        Ok(())
    }

    #[test]
    fn changes_invalidate_descendants() -> Result<()> {
        let mut ui = ui();
        let root = ui.create_root(&NodeConfig::new(NodeKind::Panel).size(300.0, 300.0))?;
        let mid = ui.create_child(root, &NodeConfig::new(NodeKind::Panel).rect(10.0, 10.0, 100.0, 100.0))?;
        let leaf = ui.create_child(mid, &NodeConfig::new(NodeKind::Panel).rect(5.0, 5.0, 10.0, 10.0))?;
        assert_eq!(ui.bounds_of(leaf)?, Rect::new(15.0, 15.0, 10.0, 10.0));
        assert!(!ui.node(leaf)?.is_dirty());

        ui.set_position(mid, 50.0, 60.0)?;
        assert!(ui.node(leaf)?.is_dirty());
        assert!(!ui.node(root)?.is_dirty());
        assert_eq!(ui.bounds_of(leaf)?, Rect::new(55.0, 65.0, 10.0, 10.0));
        Ok(())
    }

    #[test]
    fn sanitizes_non_finite_and_negative_input() -> Result<()> {
        let mut ui = ui();
        let root = ui.create_root(&NodeConfig::new(NodeKind::Panel).size(-5.0, f32::NAN))?;
        assert_eq!(ui.bounds_of(root)?, Rect::new(0.0, 0.0, 0.0, 0.0));
        ui.set_position(root, f32::INFINITY, 3.0)?;
        ui.set_size(root, 10.0, f32::NEG_INFINITY)?;
        assert_eq!(ui.bounds_of(root)?, Rect::new(0.0, 3.0, 10.0, 0.0));
        Ok(())
    }

    #[test]
    fn viewport_resize_moves_anchored_roots() -> Result<()> {
        let mut ui = ui();
        let root = ui.create_root(
            &NodeConfig::new(NodeKind::Panel)
                .size(100.0, 50.0)
                .anchor(Anchor::BottomRight),
        )?;
        assert_eq!(ui.bounds_of(root)?, Rect::new(700.0, 550.0, 100.0, 50.0));
        ui.set_viewport(400.0, 300.0);
        assert_eq!(ui.bounds_of(root)?, Rect::new(300.0, 250.0, 100.0, 50.0));
        Ok(())
    }

    #[test]
    fn auto_sized_label_follows_text() -> Result<()> {
        let mut ui = ui();
        let label = ui.create_root(
            &NodeConfig::new(NodeKind::Label)
                .text("abcd")
                .auto_size(true)
                .padding(Edges::uniform(2.0)),
        )?;
        let before = ui.bounds_of(label)?;
        assert!(before.w > 4.0);
        ui.set_text(label, "abcdefgh")?;
        let after = ui.bounds_of(label)?;
        assert!(after.w > before.w);
        assert_eq!(after.h, before.h);
        Ok(())
    }

    #[test]
    fn destroying_subtree_reports_detached() -> Result<()> {
        let mut ui = ui();
        let root = ui.create_root(&NodeConfig::new(NodeKind::Panel).size(100.0, 100.0))?;
        let child = ui.create_child(root, &NodeConfig::new(NodeKind::Panel).size(10.0, 10.0))?;

        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        ui.on(child, EventKind::Destroy, move |ui, node, _| {
            log.borrow_mut().push(ui.bounds_of(node));
            Ok(())
        })?;
        ui.destroy(root)?;

        assert_eq!(*seen.borrow(), vec![Err(Error::Detached(child))]);
        assert!(!ui.contains(root));
        assert!(!ui.contains(child));
        assert_eq!(ui.bounds_of(child), Err(Error::NodeNotFound(child)));
        assert!(ui.roots().is_empty());
        Ok(())
    }

    #[test]
    fn reparent_rejects_cycles() -> Result<()> {
        let mut ui = ui();
        let a = ui.create_root(&NodeConfig::new(NodeKind::Panel))?;
        let b = ui.create_child(a, &NodeConfig::new(NodeKind::Panel))?;
        let c = ui.create_child(b, &NodeConfig::new(NodeKind::Panel))?;
        assert_eq!(
            ui.reparent(a, Some(c)),
            Err(Error::WouldCreateCycle { parent: c, child: a })
        );
        assert_eq!(
            ui.add_child(b, b),
            Err(Error::WouldCreateCycle { parent: b, child: b })
        );
        // The tree is unchanged.
        assert_eq!(ui.node(c)?.parent(), Some(b));
        assert_eq!(ui.roots(), &[a]);

        ui.reparent(c, None)?;
        assert_eq!(ui.roots(), &[a, c]);
        assert!(ui.node(b)?.children().is_empty());
        Ok(())
    }
}
