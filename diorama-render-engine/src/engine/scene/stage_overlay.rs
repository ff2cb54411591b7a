use crate::constants::render_settings::OVERLAY_FONT_SIZE;
use crate::engine::orbit::StageChanged;
use bevy::prelude::*;

/// Native-only stage indicator. Web builds report stages to the host page.
#[derive(Component)]
pub struct StageText;

pub fn spawn_stage_overlay(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(stage_label(None)),
                TextFont {
                    font_size: OVERLAY_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                StageText,
            ));
        });
}

pub fn stage_text_update_system(
    mut stage_events: EventReader<StageChanged>,
    mut query: Query<&mut Text, With<StageText>>,
) {
    let Some(StageChanged(change)) = stage_events.read().last() else {
        return;
    };
    for mut text in &mut query {
        text.0 = stage_label(change.current);
    }
}

fn stage_label(stage: Option<u32>) -> String {
    match stage {
        Some(id) => format!("Stage {id}"),
        None => "Stage: -".to_string(),
    }
}
