//! Integration tests for the animation scheduler.

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc, time::Duration};

    use trellis::{
        AnimationState, Easing, Error, NodeConfig, NodeId, NodeKind, Property, Result, Ui,
        geom::Size,
        layout::{Flow, Layout},
    };

    const SEC: Duration = Duration::from_secs(1);
    const QUARTER: Duration = Duration::from_millis(250);

    fn setup() -> Result<(Ui, NodeId)> {
        let mut ui = Ui::new(Size::new(800.0, 600.0));
        let node = ui.create_root(&NodeConfig::new(NodeKind::Panel).size(50.0, 50.0))?;
        Ok((ui, node))
    }

    #[test]
    fn converges_to_target_and_is_discarded() -> Result<()> {
        let (mut ui, node) = setup()?;
        let id = ui.animate(node, &[(Property::X, 100.0)], SEC, Easing::Linear)?;
        assert_eq!(ui.animation_state(id), Some(AnimationState::Pending));

        ui.update(QUARTER);
        assert_eq!(ui.node(node)?.local().x, 25.0);
        assert_eq!(ui.bounds_of(node)?.x, 25.0);
        assert_eq!(ui.animation_state(id), Some(AnimationState::Running));

        ui.update(SEC);
        assert_eq!(ui.node(node)?.local().x, 100.0);
        assert_eq!(ui.bounds_of(node)?.x, 100.0);
        assert_eq!(ui.animation_state(id), None);
        assert_eq!(ui.active_animations(), 0);
        Ok(())
    }

    #[test]
    fn easing_shapes_progress() -> Result<()> {
        let (mut ui, node) = setup()?;
        ui.animate(node, &[(Property::Y, 100.0)], SEC, Easing::EaseInQuad)?;
        ui.update(QUARTER);
        assert_eq!(ui.node(node)?.local().y, 6.25);
        Ok(())
    }

    #[test]
    fn cancel_stops_in_place() -> Result<()> {
        let (mut ui, node) = setup()?;
        let id = ui.animate(node, &[(Property::X, 100.0)], SEC, Easing::Linear)?;
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        ui.on_animation_complete(id, move |_, _| {
            flag.set(true);
            Ok(())
        })?;
        ui.update(QUARTER);
        assert!(ui.cancel(id));
        assert!(!ui.cancel(id));
        ui.update(SEC);
        assert_eq!(ui.node(node)?.local().x, 25.0);
        assert!(!fired.get());
        Ok(())
    }

    #[test]
    fn completion_fires_once() -> Result<()> {
        let (mut ui, node) = setup()?;
        let id = ui.animate(
            node,
            &[(Property::Width, 150.0), (Property::Opacity, 0.0)],
            QUARTER,
            Easing::EaseOutBounce,
        )?;
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        ui.on_animation_complete(id, move |ui, done| {
            assert_eq!(done, id);
            c.set(c.get() + 1);
            // Callbacks may schedule follow-up work.
            ui.animate(node, &[(Property::Height, 10.0)], QUARTER, Easing::Linear)?;
            Ok(())
        })?;
        ui.update(SEC);
        ui.update(SEC);
        ui.update(SEC);
        assert_eq!(calls.get(), 1);
        assert_eq!(ui.node(node)?.size(), Size::new(150.0, 10.0));
        assert_eq!(ui.node(node)?.opacity(), 0.0);
        assert!(matches!(
            ui.on_animation_complete(id, |_, _| Ok(())),
            Err(Error::InvalidOperation(_))
        ));
        Ok(())
    }

    #[test]
    fn zero_duration_completes_on_next_tick() -> Result<()> {
        let (mut ui, node) = setup()?;
        let id = ui.animate(node, &[(Property::Z, 7.0)], Duration::ZERO, Easing::Linear)?;
        assert_eq!(ui.node(node)?.z(), 0);
        ui.update(Duration::ZERO);
        assert_eq!(ui.node(node)?.z(), 7);
        assert_eq!(ui.animation_state(id), None);
        Ok(())
    }

    #[test]
    fn later_animation_wins_on_overlap() -> Result<()> {
        let (mut ui, node) = setup()?;
        ui.animate(node, &[(Property::X, 100.0)], SEC, Easing::Linear)?;
        ui.animate(node, &[(Property::X, 50.0)], SEC, Easing::Linear)?;
        ui.update(Duration::from_millis(500));
        assert_eq!(ui.node(node)?.local().x, 25.0);
        Ok(())
    }

    #[test]
    fn named_properties_and_easings() -> Result<()> {
        let mut ui = Ui::new(Size::new(800.0, 600.0));
        let node = ui.create_root(
            &NodeConfig::new(NodeKind::Panel)
                .size(10.0, 10.0)
                .prop("glow", 1.0),
        )?;
        ui.animate_named(node, &[("glow", 3.0), ("opacity", 0.5)], SEC, "ease-out")?;
        ui.update(SEC);
        assert_eq!(ui.node(node)?.prop("glow"), Some(3.0));
        assert_eq!(ui.node(node)?.opacity(), 0.5);

        assert!(matches!(
            ui.animate_named(node, &[("x", 1.0)], SEC, "wobble"),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            ui.animate_named(node, &[("sparkle", 1.0)], SEC, "linear"),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            ui.animate(node, &[(Property::ScrollY, 1.0)], SEC, Easing::Linear),
            Err(Error::Configuration(_))
        ));
        assert_eq!(ui.active_animations(), 0);
        Ok(())
    }

    #[test]
    fn geometry_animation_relayouts_siblings() -> Result<()> {
        let mut ui = Ui::new(Size::new(800.0, 600.0));
        let row = ui.create_root(&NodeConfig::new(NodeKind::Container).size(600.0, 50.0))?;
        ui.set_layout(row, Layout::FlowHorizontal(Flow::new().spacing(10.0)))?;
        let a = ui.create_child(row, &NodeConfig::new(NodeKind::Panel).size(100.0, 20.0))?;
        let b = ui.create_child(row, &NodeConfig::new(NodeKind::Panel).size(100.0, 20.0))?;
        assert_eq!(ui.bounds_of(b)?.x, 110.0);

        ui.animate(a, &[(Property::Width, 200.0)], SEC, Easing::Linear)?;
        ui.update(SEC);
        assert_eq!(ui.bounds_of(a)?.w, 200.0);
        assert_eq!(ui.bounds_of(b)?.x, 210.0);
        Ok(())
    }

    #[test]
    fn destroy_cancels_animations() -> Result<()> {
        let (mut ui, node) = setup()?;
        let id = ui.animate(node, &[(Property::X, 100.0)], SEC, Easing::Linear)?;
        ui.destroy(node)?;
        assert_eq!(ui.animation_state(id), None);
        assert_eq!(ui.active_animations(), 0);
        ui.update(SEC);
        Ok(())
    }

    #[test]
    fn failing_completion_is_counted() -> Result<()> {
        let (mut ui, node) = setup()?;
        let id = ui.animate(node, &[(Property::X, 1.0)], QUARTER, Easing::Linear)?;
        ui.on_animation_complete(id, |_, _| Err(Error::listener("nope")))?;
        ui.update(SEC);
        assert_eq!(ui.listener_failures(), 1);
        Ok(())
    }
}
