//! Unit tests for route table composition

use serve_chat_gateway::config::FeatureFlags;
use serve_chat_gateway::gateway::{MountKind, RouteTable};

fn flags(enable_all: bool, enable_chat_api: bool, enable_swagger_ui: bool) -> FeatureFlags {
    FeatureFlags {
        enable_all,
        enable_chat_api,
        enable_swagger_ui,
        ..Default::default()
    }
}

#[test]
fn test_all_flag_combinations() {
    // (enable_all, enable_chat_api, enable_swagger_ui) -> expected prefixes
    let cases: [((bool, bool, bool), &[&str]); 8] = [
        ((false, false, false), &["/site/", "/"]),
        ((false, false, true), &["/swagger/", "/site/", "/"]),
        ((false, true, false), &["/chat/", "/site/", "/"]),
        ((false, true, true), &["/chat/", "/swagger/", "/site/", "/"]),
        ((true, false, false), &["/chat/", "/swagger/", "/site/", "/"]),
        ((true, false, true), &["/chat/", "/swagger/", "/site/", "/"]),
        ((true, true, false), &["/chat/", "/swagger/", "/site/", "/"]),
        ((true, true, true), &["/chat/", "/swagger/", "/site/", "/"]),
    ];

    for ((all, chat, swagger), expected) in cases {
        let table = RouteTable::plan(&flags(all, chat, swagger));
        assert_eq!(
            table.prefixes(),
            expected.to_vec(),
            "enable_all={} enable_chat_api={} enable_swagger_ui={}",
            all,
            chat,
            swagger
        );
    }
}

#[test]
fn test_console_and_static_always_mounted() {
    for all in [false, true] {
        for chat in [false, true] {
            for swagger in [false, true] {
                let table = RouteTable::plan(&flags(all, chat, swagger));
                assert!(table.contains(MountKind::Console));
                assert!(table.contains(MountKind::StaticFiles));
                assert_eq!(table.contains(MountKind::ChatApi), all || chat);
                assert_eq!(table.contains(MountKind::SwaggerUi), all || swagger);
            }
        }
    }
}

#[test]
fn test_banner_has_one_line_per_mount() {
    let flags = flags(true, false, false);
    let table = RouteTable::plan(&flags);
    let banner = table.banner(&flags);
    assert_eq!(banner.len(), table.mounts().len());
    assert!(banner[1].contains("Swagger UI"));
    assert!(banner[1].ends_with(":8262/swagger/"));
}
