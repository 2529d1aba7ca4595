//! The admin command catalog.
//!
//! One declarative row per server command: wire name, response-shape
//! metadata, and the ordered parameter list with its defaulting rules. The
//! whole admin surface lives in this table; the dispatcher consumes it and
//! contains no per-command code.
//!
//! Defaulting conventions, applied uniformly below: `host`-family parameters
//! (`host`, `server`, `localserver`, `grouphost`) default to the configured
//! [`Host`](crate::config::Host); MUC `service`/`serverhost` parameters
//! default to its `conference.` form; `leave_cluster`'s `node` defaults to
//! its `ejabberd@` node name. Room parameters of the MUC-Sub commands accept
//! a bare room name and are suffixed into a full conference JID.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::json;

use crate::schema::{CommandDefinition, DefaultRule, ParamSpec, Returns, Transform};

// ---------------------------------------------------------------------------
// Row-builder shorthands, local to this table.
// ---------------------------------------------------------------------------

fn cmd(name: &'static str, returns: Returns, params: Vec<ParamSpec>) -> CommandDefinition {
    CommandDefinition::new(name, returns, params)
}

fn req(key: &'static str) -> ParamSpec {
    ParamSpec::required(key)
}

fn lit(key: &'static str, value: serde_json::Value) -> ParamSpec {
    ParamSpec::with_default(key, DefaultRule::Literal(value))
}

fn host(key: &'static str) -> ParamSpec {
    ParamSpec::with_default(key, DefaultRule::Host)
}

fn service(key: &'static str) -> ParamSpec {
    ParamSpec::with_default(key, DefaultRule::ConferenceHost)
}

fn node(key: &'static str) -> ParamSpec {
    ParamSpec::with_default(key, DefaultRule::NodeName)
}

fn room(key: &'static str) -> ParamSpec {
    ParamSpec::required(key).transformed(Transform::RoomJid)
}

// ---------------------------------------------------------------------------
// The table
// ---------------------------------------------------------------------------

static REGISTRY: Lazy<HashMap<&'static str, CommandDefinition>> = Lazy::new(|| {
    use Returns::{Code, Json, Raw};

    let rows = vec![
        // Accounts
        cmd("register", Code, vec![req("user"), req("password"), host("host")]),
        cmd("unregister", Raw, vec![req("user"), host("host")]),
        cmd("check_account", Code, vec![req("user"), host("host")]),
        cmd("check_password", Code, vec![req("user"), req("password"), host("host")]),
        cmd(
            "check_password_hash",
            Code,
            vec![req("user"), req("passwordhash"), lit("hashmethod", json!("md5")), host("host")],
        ),
        cmd("change_password", Code, vec![req("user"), req("newpass"), host("host")]),
        cmd("ban_account", Code, vec![req("user"), lit("reason", json!(null)), host("host")]),
        cmd("registered_users", Json, vec![host("host")]),
        cmd("registered_vhosts", Json, vec![]),
        cmd("num_active_users", Json, vec![lit("days", json!(3)), host("host")]),
        cmd("delete_old_users", Raw, vec![lit("days", json!(31))]),
        cmd("delete_old_users_vhost", Raw, vec![lit("days", json!(31)), host("host")]),
        cmd("convert_to_scram", Code, vec![host("host")]),
        // Sessions and presence
        cmd("connected_users", Json, vec![]),
        cmd("connected_users_info", Json, vec![]),
        cmd("connected_users_number", Json, vec![]),
        cmd("connected_users_vhost", Json, vec![host("host")]),
        cmd("user_resources", Json, vec![req("user"), host("host")]),
        cmd("user_sessions_info", Json, vec![req("user"), host("host")]),
        cmd("num_resources", Json, vec![req("user"), host("host")]),
        cmd("resource_num", Json, vec![req("user"), req("num"), host("host")]),
        cmd(
            "kick_session",
            Code,
            vec![req("user"), req("resource"), req("reason"), host("host")],
        ),
        cmd("kick_user", Json, vec![req("user"), host("host")]),
        cmd("status_list", Json, vec![lit("status", json!("dnd"))]),
        cmd("status_list_host", Json, vec![lit("status", json!("dnd")), host("host")]),
        cmd("status_num", Json, vec![req("status")]),
        cmd("status_num_host", Json, vec![lit("status", json!("dnd")), host("host")]),
        cmd(
            "set_presence",
            Code,
            vec![
                req("user"),
                req("resource"),
                req("type"),
                req("show"),
                req("status"),
                req("priority"),
                host("host"),
            ],
        ),
        cmd("get_presence", Json, vec![req("user"), host("server")]),
        cmd("get_last", Json, vec![req("user"), host("host")]),
        cmd("set_last", Code, vec![req("user"), req("timestamp"), req("status"), host("host")]),
        // Rosters
        cmd(
            "add_rosteritem",
            Code,
            vec![
                req("localuser"),
                req("user"),
                lit("nick", json!("")),
                lit("subs", json!("both")),
                lit("group", json!("")),
                host("server"),
                host("localserver"),
            ],
        ),
        cmd(
            "delete_rosteritem",
            Code,
            vec![req("localuser"), req("user"), host("localserver"), host("server")],
        ),
        cmd("get_roster", Json, vec![req("user"), host("server")]),
        cmd("push_roster", Code, vec![req("user"), req("file"), host("host")]),
        cmd("push_roster_all", Code, vec![req("file")]),
        cmd("push_alltoall", Code, vec![req("group"), host("host")]),
        cmd(
            "process_rosteritems",
            Json,
            vec![req("action"), req("subs"), req("asks"), req("users"), req("contacts")],
        ),
        // Shared roster groups
        cmd(
            "srg_create",
            Code,
            vec![req("group"), req("name"), req("description"), req("display"), host("host")],
        ),
        cmd("srg_delete", Code, vec![req("group"), host("host")]),
        cmd("srg_get_info", Json, vec![req("group"), host("host")]),
        cmd("srg_get_members", Json, vec![req("group"), host("host")]),
        cmd("srg_list", Json, vec![host("host")]),
        cmd(
            "srg_user_add",
            Code,
            vec![req("user"), req("group"), host("host"), host("grouphost")],
        ),
        cmd(
            "srg_user_del",
            Code,
            vec![req("user"), req("group"), host("host"), host("grouphost")],
        ),
        // vCards
        cmd("get_vcard", Json, vec![req("user"), req("name"), host("host")]),
        cmd("get_vcard2", Json, vec![req("user"), req("name"), req("subname"), host("host")]),
        cmd(
            "get_vcard2_multi",
            Json,
            vec![req("user"), req("name"), req("subname"), host("host")],
        ),
        cmd("set_vcard", Code, vec![req("user"), req("name"), req("content"), host("host")]),
        cmd(
            "set_vcard2",
            Code,
            vec![req("user"), req("name"), req("subname"), req("content"), host("host")],
        ),
        cmd(
            "set_vcard2_multi",
            Code,
            vec![req("user"), req("name"), req("subname"), req("content"), host("host")],
        ),
        cmd("set_nickname", Code, vec![req("user"), req("nickname"), host("host")]),
        // Private storage and privacy lists
        cmd("private_get", Json, vec![req("user"), req("element"), req("ns"), host("host")]),
        cmd("private_set", Code, vec![req("user"), req("element"), host("host")]),
        cmd("privacy_set", Code, vec![req("user"), req("xmlquery"), host("host")]),
        // Messages, offline, and MAM
        cmd(
            "send_message",
            Code,
            vec![req("from"), req("to"), req("subject"), req("body"), lit("type", json!("chat"))],
        ),
        cmd("send_stanza", Code, vec![req("from"), req("to"), req("stanza")]),
        cmd(
            "send_stanza_c2s",
            Code,
            vec![req("user"), req("stanza"), req("resource"), host("host")],
        ),
        cmd("get_offline_count", Json, vec![req("user"), host("server")]),
        cmd("delete_old_messages", Code, vec![lit("days", json!(31))]),
        cmd("delete_expired_messages", Code, vec![]),
        cmd(
            "delete_old_mam_messages",
            Code,
            vec![lit("type", json!("all")), lit("days", json!(31))],
        ),
        cmd("delete_old_push_sessions", Code, vec![lit("days", json!(31))]),
        cmd("remove_mam_for_user", Raw, vec![req("user"), host("server")]),
        cmd(
            "remove_mam_for_user_with_peer",
            Raw,
            vec![req("user"), req("with"), host("server")],
        ),
        // MUC rooms
        cmd("muc_online_rooms", Json, vec![host("host")]),
        cmd("muc_online_rooms_by_regex", Json, vec![req("regex"), host("host")]),
        cmd("muc_register_nick", Code, vec![req("jid"), req("nick"), service("serverhost")]),
        cmd("muc_unregister_nick", Code, vec![req("jid"), service("serverhost")]),
        cmd("create_room", Code, vec![req("name"), host("host"), service("service")]),
        cmd(
            "create_room_with_opts",
            Code,
            vec![req("name"), req("options"), service("service"), host("host")],
        ),
        cmd("create_rooms_file", Code, vec![req("file")]),
        cmd("destroy_room", Code, vec![req("name"), service("service")]),
        cmd("destroy_rooms_file", Code, vec![req("file")]),
        cmd(
            "change_room_option",
            Code,
            vec![
                req("name"),
                lit("option", json!("members_only")),
                lit("value", json!("true")),
                service("service"),
            ],
        ),
        cmd("get_room_options", Json, vec![req("name"), service("service")]),
        cmd("get_room_affiliation", Json, vec![req("name"), req("jid"), service("service")]),
        cmd("get_room_affiliations", Json, vec![req("name"), service("service")]),
        cmd(
            "set_room_affiliation",
            Code,
            vec![req("jid"), req("name"), req("affiliation"), service("service")],
        ),
        cmd("get_room_occupants", Json, vec![req("name"), service("service")]),
        cmd("get_room_occupants_number", Json, vec![req("name"), service("service")]),
        cmd("rooms_unused_list", Json, vec![lit("days", json!(31)), host("host")]),
        cmd("rooms_unused_destroy", Json, vec![lit("days", json!(31)), host("host")]),
        cmd(
            "send_direct_invitation",
            Code,
            vec![
                req("name"),
                req("users"),
                lit("password", json!("")),
                lit("reason", json!("")),
                service("service"),
            ],
        ),
        // MUC subscriptions
        cmd(
            "subscribe_room",
            Json,
            vec![
                req("user"),
                req("nick"),
                room("room"),
                lit(
                    "nodes",
                    json!("urn:xmpp:mucsub:nodes:messages,urn:xmpp:mucsub:nodes:affiliations"),
                ),
            ],
        ),
        cmd("unsubscribe_room", Code, vec![req("user"), room("room")]),
        cmd("get_subscribers", Json, vec![req("name"), service("service")]),
        cmd("get_user_rooms", Json, vec![req("user"), host("host")]),
        // OAuth
        cmd("oauth_issue_token", Json, vec![req("jid"), req("scopes"), lit("ttl", json!(3600))]),
        cmd("oauth_list_tokens", Json, vec![]),
        cmd("oauth_revoke_token", Json, vec![req("token")]),
        // Server-to-server
        cmd("incoming_s2s_number", Json, vec![]),
        cmd("outgoing_s2s_number", Json, vec![]),
        cmd("stop_s2s_connections", Code, vec![]),
        // Cluster and Mnesia
        cmd("join_cluster", Code, vec![req("node")]),
        cmd("leave_cluster", Code, vec![node("node")]),
        cmd("list_cluster", Json, vec![]),
        cmd("set_master", Code, vec![req("nodename")]),
        cmd(
            "mnesia_change_nodename",
            Code,
            vec![req("oldnodename"), req("newnodename"), req("oldbackup"), req("newbackup")],
        ),
        cmd("delete_mnesia", Code, vec![host("host")]),
        cmd("get_cookie", Json, vec![]),
        // Backup and restore
        cmd("backup", Raw, vec![req("file")]),
        cmd("restore", Raw, vec![req("file")]),
        cmd("dump", Raw, vec![req("file")]),
        cmd("dump_table", Code, vec![req("file"), req("table")]),
        cmd("load", Raw, vec![req("file")]),
        cmd("install_fallback", Raw, vec![req("file")]),
        // Import and export
        cmd("import_file", Code, vec![req("file")]),
        cmd("import_dir", Raw, vec![req("file")]),
        cmd("import_piefxis", Code, vec![req("file")]),
        cmd("import_prosody", Code, vec![req("dir")]),
        cmd("export_piefxis", Code, vec![req("dir")]),
        cmd("export_piefxis_host", Code, vec![req("dir"), host("host")]),
        cmd("export2sql", Code, vec![req("file"), host("host")]),
        cmd("update_sql", Code, vec![]),
        // Server lifecycle and configuration
        cmd("status", Raw, vec![]),
        cmd("reload_config", Code, vec![]),
        cmd("restart", Code, vec![]),
        cmd("stop", Code, vec![]),
        cmd(
            "stop_kindly",
            Code,
            vec![lit("announcement", json!("Server will stop now.")), lit("delay", json!(60))],
        ),
        cmd("convert_to_yaml", Code, vec![req("in"), req("out")]),
        cmd("clear_cache", Code, vec![]),
        cmd("compile", Code, vec![req("file")]),
        cmd("update", Raw, vec![req("module")]),
        cmd("update_list", Json, vec![]),
        cmd("restart_module", Code, vec![req("module"), host("host")]),
        // Contributed modules
        cmd("modules_available", Json, vec![]),
        cmd("modules_installed", Json, vec![]),
        cmd("modules_update_specs", Code, vec![]),
        cmd("module_check", Code, vec![req("module")]),
        cmd("module_install", Code, vec![req("module")]),
        cmd("module_uninstall", Code, vec![req("module")]),
        cmd("module_upgrade", Code, vec![req("module")]),
        // Logging
        cmd("get_loglevel", Json, vec![]),
        cmd("set_loglevel", Json, vec![req("loglevel")]),
        cmd("reopen_log", Code, vec![]),
        cmd("rotate_log", Code, vec![]),
        // ACME certificates
        cmd("get_certificates", Code, vec![req("domains")]),
        cmd("list_certificates", Json, vec![req("option")]),
        cmd("renew_certificates", Json, vec![]),
        cmd("revoke_certificate", Raw, vec![req("domain_or_file")]),
        // Documentation and statistics
        cmd(
            "gen_html_doc_for_commands",
            Code,
            vec![req("file"), req("regexp"), lit("examples", json!("java,json"))],
        ),
        cmd(
            "gen_markdown_doc_for_commands",
            Code,
            vec![req("file"), req("regexp"), lit("examples", json!("java,json"))],
        ),
        cmd("stats", Json, vec![req("name")]),
        cmd("stats_host", Json, vec![req("name"), host("host")]),
    ];

    rows.into_iter().map(|row| (row.name(), row)).collect()
});

/// Looks up a command definition by its wire name.
pub fn lookup(name: &str) -> Option<&'static CommandDefinition> {
    REGISTRY.get(name)
}

/// Iterates over every catalogued command, in no particular order.
pub fn commands() -> impl Iterator<Item = &'static CommandDefinition> {
    REGISTRY.values()
}
