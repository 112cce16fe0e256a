//! Integration tests for building trees from configuration.

#[cfg(test)]
mod tests {
    use trellis::{
        Anchor, Error, NodeConfig, NodeKind, Result, Ui, UiConfig,
        geom::{Rect, Size},
        layout::LayoutKind,
    };

    #[test]
    fn manager_from_json() -> Result<()> {
        let config = UiConfig::from_json(r#"{"viewport": {"w": 400, "h": 300}, "modal_z_base": 50}"#)?;
        let mut ui = Ui::with_config(config);
        assert_eq!(ui.config().viewport, Size::new(400.0, 300.0));

        let root = ui.create_root(&NodeConfig::new(NodeKind::Panel).size(40.0, 30.0).anchor(Anchor::Center))?;
        assert_eq!(ui.bounds_of(root)?, Rect::new(180.0, 135.0, 40.0, 30.0));
        Ok(())
    }

    #[test]
    fn tree_from_json_nodes() -> Result<()> {
        let mut ui = Ui::new(Size::new(800.0, 600.0));
        let grid = NodeConfig::from_json(
            r#"{
                "kind": "container",
                "name": "Tile Grid",
                "width": 300, "height": 300,
                "padding": {"top": 10, "left": 10},
                "layout": {"strategy": "grid", "columns": 2, "rows": 2, "gap": 10}
            }"#,
        )?;
        let root = ui.create_root(&grid)?;
        assert_eq!(ui.node(root)?.name().as_str(), "tile_grid");
        assert_eq!(
            ui.node(root)?.layout().map(|l| l.kind()),
            Some(LayoutKind::Grid)
        );

        let tile = NodeConfig::from_json(r#"{"kind": "button", "text": "go", "item": {"cell": [1, 0]}}"#)?;
        let t = ui.create_child(root, &tile)?;
        // Content is 290x290; cells are 140x140 with a 10px gap.
        assert_eq!(ui.bounds_of(t)?, Rect::new(160.0, 10.0, 140.0, 140.0));
        assert_eq!(ui.node(t)?.text(), Some("go"));
        Ok(())
    }

    #[test]
    fn invalid_configuration_is_rejected() -> Result<()> {
        let mut ui = Ui::new(Size::new(800.0, 600.0));
        let before = ui.len();

        let unknown = NodeConfig::from_json(r#"{"kind": "container", "layout": {"strategy": "spiral"}}"#)?;
        assert!(matches!(ui.create(&unknown), Err(Error::Configuration(_))));

        let misplaced = NodeConfig::from_json(r#"{"kind": "label", "layout": {"strategy": "grid"}}"#)?;
        assert!(matches!(ui.create(&misplaced), Err(Error::InvalidOperation(_))));

        assert!(matches!(
            NodeConfig::from_json(r#"{"style": {"background": "red"}}"#),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            UiConfig::from_json("{not json"),
            Err(Error::Configuration(_))
        ));
        assert_eq!(ui.len(), before);

        let root = ui.create_root(&NodeConfig::new(NodeKind::Panel))?;
        assert!(matches!(
            ui.set_anchor_named(root, "upper-left"),
            Err(Error::Configuration(_))
        ));
        ui.set_anchor_named(root, "bottom-center")?;
        assert_eq!(ui.node(root)?.anchor(), Anchor::BottomCenter);
        Ok(())
    }
}
