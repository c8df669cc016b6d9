//! Command and query execution against an Editor.
//!
//! This module connects the abstract Command/Query types to the editor,
//! executing operations and returning results.

use crate::{
    Command, CommandResult, PointInfo, Query, QueryResult, Target, ZoneDiagnostics, ZoneInfo,
};
use editor::Editor;
use zone::{CanvasDelta, CanvasPoint, Zone, ZoneId, ZoneOption};

/// Execute a command against an editor.
///
/// The change set is computed by comparing zones before and after.
pub fn execute_command(editor: &mut Editor, command: Command) -> CommandResult {
    let before = snapshot(editor);
    if let Err(message) = apply(editor, command) {
        log::warn!("command failed: {}", message);
        return CommandResult::error(message);
    }
    diff(&before, &snapshot(editor))
}

/// Execute a query against an editor.
pub fn execute_query(editor: &Editor, query: Query) -> QueryResult {
    match query {
        Query::GetZones => QueryResult::Zones {
            zones: editor
                .zones
                .iter()
                .enumerate()
                .map(|(i, z)| zone_to_info(i, z))
                .collect(),
        },

        Query::GetZone { target } => {
            let ids = resolve_target(editor, &target);
            QueryResult::Zone {
                zone: ids.first().and_then(|id| {
                    editor
                        .zones
                        .iter()
                        .enumerate()
                        .find(|(_, z)| z.id == *id)
                        .map(|(i, z)| zone_to_info(i, z))
                }),
            }
        }

        Query::GetOptions => QueryResult::Options {
            zones: editor.to_option(),
        },

        Query::GetFocus => QueryResult::Focus {
            focus: editor.focus(),
        },

        Query::GetZoneCount => QueryResult::Count {
            count: editor.zones.len(),
        },

        Query::GetDiagnostics => {
            let size = editor.size();
            QueryResult::Diagnostics {
                zones: editor
                    .zones
                    .iter()
                    .enumerate()
                    .map(|(index, z)| ZoneDiagnostics {
                        id: z.id,
                        index,
                        distorted: z.is_distorted(),
                        out_of_bounds: z.is_out_of_bounds(size),
                    })
                    .collect(),
            }
        }

        Query::GetCursor => QueryResult::Cursor {
            cursor: editor.cursor(),
        },

        Query::GetCanvas => QueryResult::Canvas {
            width: editor.config().width,
            height: editor.config().height,
        },

        Query::HitTest { position } => {
            let position = CanvasPoint(position);
            let point = editor.point_at(position);
            QueryResult::Hit {
                zone: editor.zone_at(position),
                point: point.map(|(_, p)| p),
                edge: match point {
                    Some(_) => None,
                    None => editor.edge_at(position).map(|(_, i)| i),
                },
            }
        }
    }
}

fn apply(editor: &mut Editor, command: Command) -> Result<(), String> {
    match command {
        Command::PointerDown { position } => editor.pointer_down(CanvasPoint(position)),
        Command::PointerMove { position } => editor.pointer_move(CanvasPoint(position)),
        Command::PointerUp => editor.pointer_up(),
        Command::KeyDown { key } => editor.key_down(&key),
        Command::DoubleClick { position } => editor.double_click(CanvasPoint(position)),

        Command::Append => {
            editor.append();
        }

        Command::Delete { target } => {
            for id in resolve_target(editor, &target) {
                editor.delete_zone(id);
            }
        }

        Command::Move { target, delta } => {
            for id in resolve_target(editor, &target) {
                editor.move_zone(id, CanvasDelta(delta));
            }
        }

        Command::Focus { target } => {
            let id = resolve_target(editor, &target)
                .first()
                .copied()
                .ok_or_else(|| format!("No zone matches {:?}", target))?;
            editor.focus_zone(id, None);
        }

        Command::ClearFocus => editor.clear_focus(),

        Command::SetZones { zones } => editor.set_zones(&zones),

        Command::DeletePoint { point } => {
            let id = point
                .or_else(|| editor.focus().and_then(|f| f.point))
                .ok_or("No point given and no point focused")?;
            if !editor.delete_point(id) {
                return Err(format!("Point not found: {}", id));
            }
        }

        Command::MovePoint { point, delta } => {
            let id = point
                .or_else(|| editor.focus().and_then(|f| f.point))
                .ok_or("No point given and no point focused")?;
            if !editor.move_point(id, CanvasDelta(delta)) {
                return Err(format!("Point not found: {}", id));
            }
        }

        Command::InsertPoint {
            target,
            after,
            position,
        } => {
            let id = resolve_target(editor, &target)
                .first()
                .copied()
                .ok_or_else(|| format!("No zone matches {:?}", target))?;
            editor.insert_point(id, after, CanvasPoint(position));
        }

        // All or nothing: a failing command undoes the ones before it.
        Command::Batch { commands } => {
            let (zones, focus) = (editor.zones.clone(), editor.focus());
            if let Err(message) = commands.into_iter().try_for_each(|c| apply(editor, c)) {
                editor.restore(zones, focus);
                return Err(message);
            }
        }
    }
    Ok(())
}

/// Resolve a target to zone ids, in list order.
fn resolve_target(editor: &Editor, target: &Target) -> Vec<ZoneId> {
    match target {
        Target::Focused => editor.focus().map(|f| f.zone).into_iter().collect(),
        Target::Zone(id) => editor
            .zone(*id)
            .map(|z| z.id)
            .into_iter()
            .collect(),
        Target::Index(i) => editor.zones.get(*i).map(|z| z.id).into_iter().collect(),
        Target::All => editor.zones.iter().map(|z| z.id).collect(),
    }
}

fn snapshot(editor: &Editor) -> Vec<(ZoneId, ZoneOption)> {
    editor
        .zones
        .iter()
        .map(|z| (z.id, z.to_option()))
        .collect()
}

fn diff(before: &[(ZoneId, ZoneOption)], after: &[(ZoneId, ZoneOption)]) -> CommandResult {
    let find = |list: &[(ZoneId, ZoneOption)], id: ZoneId| {
        list.iter().find(|(other, _)| *other == id).map(|(_, o)| o.clone())
    };

    let mut created = Vec::new();
    let mut modified = Vec::new();
    for (id, points) in after {
        match find(before, *id) {
            None => created.push(*id),
            Some(old) if old != *points => modified.push(*id),
            Some(_) => {}
        }
    }
    let deleted = before
        .iter()
        .filter(|(id, _)| find(after, *id).is_none())
        .map(|(id, _)| *id)
        .collect();

    CommandResult::Success {
        created,
        modified,
        deleted,
    }
}

/// Convert a Zone to ZoneInfo for query results.
fn zone_to_info(index: usize, zone: &Zone) -> ZoneInfo {
    ZoneInfo {
        id: zone.id,
        index,
        closed: zone.closed,
        points: zone
            .points
            .iter()
            .map(|p| PointInfo {
                id: p.id,
                position: p.position.0,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use editor::{Cursor, EditorConfig, Key};
    use glam::Vec2;

    fn square(x: f32, y: f32, side: f32) -> ZoneOption {
        vec![[x, y], [x + side, y], [x + side, y + side], [x, y + side]]
    }

    fn editor_with(zones: &[ZoneOption]) -> Editor {
        Editor::with_zones(EditorConfig::default(), zones)
    }

    #[test]
    fn append_reports_created_zone() {
        let mut editor = Editor::default();
        let result = execute_command(&mut editor, Command::Append);
        let CommandResult::Success { created, .. } = result else {
            panic!("append failed");
        };
        assert_eq!(created, vec![editor.zones[0].id]);
    }

    #[test]
    fn drag_reports_modified_zone() {
        let mut editor = editor_with(&[square(10.0, 10.0, 100.0)]);
        let id = editor.zones[0].id;
        let result = execute_command(
            &mut editor,
            Command::Batch {
                commands: vec![
                    Command::PointerDown {
                        position: Vec2::new(50.0, 50.0),
                    },
                    Command::PointerMove {
                        position: Vec2::new(55.0, 50.0),
                    },
                    Command::PointerUp,
                ],
            },
        );
        assert_eq!(
            result,
            CommandResult::Success {
                created: vec![],
                modified: vec![id],
                deleted: vec![],
            }
        );
    }

    #[test]
    fn raising_a_zone_is_not_a_modification() {
        let mut editor = editor_with(&[square(0.0, 0.0, 100.0), square(50.0, 50.0, 100.0)]);
        let result = execute_command(
            &mut editor,
            Command::PointerDown {
                position: Vec2::new(140.0, 140.0),
            },
        );
        assert_eq!(result, CommandResult::success());
    }

    #[test]
    fn failed_batch_leaves_zones_untouched() {
        let mut editor = editor_with(&[square(10.0, 10.0, 100.0)]);
        let before = editor.to_option();
        let result = execute_command(
            &mut editor,
            Command::Batch {
                commands: vec![
                    Command::Append,
                    Command::Move {
                        target: Target::All,
                        delta: Vec2::new(5.0, 5.0),
                    },
                    Command::DeletePoint { point: None },
                ],
            },
        );
        assert!(matches!(result, CommandResult::Error { .. }));
        assert_eq!(editor.to_option(), before);
    }

    #[test]
    fn delete_key_removes_focused_zone() {
        let mut editor = editor_with(&[square(10.0, 10.0, 100.0)]);
        let id = editor.zones[0].id;
        execute_command(
            &mut editor,
            Command::PointerDown {
                position: Vec2::new(50.0, 50.0),
            },
        );
        let result = execute_command(&mut editor, Command::KeyDown { key: Key::Delete });
        let CommandResult::Success { deleted, .. } = result else {
            panic!("delete failed");
        };
        assert_eq!(deleted, vec![id]);
    }

    #[test]
    fn delete_point_without_focus_is_an_error() {
        let mut editor = editor_with(&[square(10.0, 10.0, 100.0)]);
        let result = execute_command(&mut editor, Command::DeletePoint { point: None });
        assert!(matches!(result, CommandResult::Error { .. }));
    }

    #[test]
    fn move_all_keeps_zones_in_bounds() {
        let mut editor = editor_with(&[square(10.0, 10.0, 100.0), square(300.0, 300.0, 50.0)]);
        execute_command(
            &mut editor,
            Command::Move {
                target: Target::All,
                delta: Vec2::new(-100.0, 0.0),
            },
        );
        assert_eq!(
            editor.to_option(),
            vec![square(0.0, 10.0, 100.0), square(200.0, 300.0, 50.0)]
        );
    }

    #[test]
    fn insert_point_by_index() {
        let mut editor = editor_with(&[square(10.0, 10.0, 100.0)]);
        let result = execute_command(
            &mut editor,
            Command::InsertPoint {
                target: Target::Index(0),
                after: 1,
                position: Vec2::new(110.0, 60.0),
            },
        );
        assert!(result.is_success());
        assert_eq!(editor.zones[0].to_option()[2], [110.0, 60.0]);
    }

    #[test]
    fn focus_command_requires_a_zone() {
        let mut editor = Editor::default();
        let result = execute_command(
            &mut editor,
            Command::Focus {
                target: Target::Index(0),
            },
        );
        assert!(!result.is_success());
    }

    #[test]
    fn queries_reflect_state() {
        let mut editor = editor_with(&[square(10.0, 10.0, 100.0), vec![[0.0, 0.0], [900.0, 0.0]]]);
        editor.pointer_move(CanvasPoint::new(50.0, 50.0));

        assert_eq!(
            execute_query(&editor, Query::GetZoneCount),
            QueryResult::Count { count: 2 }
        );
        assert_eq!(
            execute_query(&editor, Query::GetCursor),
            QueryResult::Cursor {
                cursor: Cursor::Pointer
            }
        );

        let QueryResult::Diagnostics { zones } = execute_query(&editor, Query::GetDiagnostics)
        else {
            panic!("expected diagnostics");
        };
        assert!(!zones[0].has_error());
        assert!(zones[1].out_of_bounds);
    }

    #[test]
    fn hit_test_reports_edge_index() {
        let editor = editor_with(&[square(10.0, 10.0, 100.0)]);
        let QueryResult::Hit { zone, point, edge } = execute_query(
            &editor,
            Query::HitTest {
                position: Vec2::new(109.0, 60.0),
            },
        ) else {
            panic!("expected hit");
        };
        assert_eq!(zone, Some(editor.zones[0].id));
        assert_eq!(point, None);
        assert_eq!(edge, Some(1));
    }
}
