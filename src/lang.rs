//! # SiriQL language definition
//!
//! The complete SiriQL grammar, assembled as pure data on top of the
//! combinator engine in [`crate::grammar`] and [`crate::matcher`]. The
//! engine supplies the matching semantics; this module only declares the
//! statement and clause taxonomy:
//!
//! - `select` with aggregate pipelines, series selectors and time windows
//! - `list` / `count` over series, servers, pools, shards, users, groups
//! - `alter` / `create` / `drop` resource administration
//! - `grant` / `revoke` access control
//! - `show` server properties, bare time expressions (calc), `help` topics
//!
//! Ordering of alternatives is load-bearing throughout: ordered choice is
//! the grammar's disambiguation mechanism, so the declaration order below
//! deliberately mirrors the original grammar and must not be "tidied".
//!
//! Two quirks are preserved on purpose and must not be fixed silently:
//! `and`/`or` share a single precedence tier inside WHERE predicates, and
//! the arithmetic tier `+ - * % /` is flat as well. Both chain left to
//! right; existing queries depend on this.

pub mod element;

pub use element::ElementId;

use crate::grammar::{Grammar, GrammarBuilder, PatternKind};
use element::ElementId as E;

/// Identifier alphabet used for keyword-run disambiguation.
///
/// A keyword only matches when the maximal run of this alphabet at the
/// cursor equals the keyword exactly, so `group` never matches inside
/// `groups`.
pub const KEYWORD_ALPHABET: &str = "[a-z_]+";

/// Builds the full SiriQL grammar.
///
/// The result is immutable and safe to share between threads; build it once
/// at startup (or use [`crate::parse`], which keeps a shared instance).
pub fn siri_grammar() -> Grammar {
    let mut g = GrammarBuilder::new();
    let this = g.this();

    // Lexical patterns
    let r_float = g.pattern(E::RFloat, PatternKind::Float);
    let r_integer = g.pattern(E::RInteger, PatternKind::Integer);
    let r_uinteger = g.pattern(E::RUinteger, PatternKind::UInteger);
    let r_time_str = g.pattern(E::RTimeStr, PatternKind::TimeStr);
    let r_singleq_str = g.pattern(E::RSingleqStr, PatternKind::SingleQuoteStr);
    let r_doubleq_str = g.pattern(E::RDoubleqStr, PatternKind::DoubleQuoteStr);
    let r_grave_str = g.pattern(E::RGraveStr, PatternKind::GraveStr);
    let r_uuid_str = g.pattern(E::RUuidStr, PatternKind::UuidStr);
    let r_regex = g.pattern(E::RRegex, PatternKind::RegexStr);
    let r_comment = g.pattern(E::RComment, PatternKind::Comment);

    // Shared punctuation
    let comma = g.token(None, ",");
    let lparen = g.token(None, "(");
    let rparen = g.token(None, ")");

    // Keywords
    let k_access = g.keyword(E::KAccess, "access");
    let k_active_handles = g.keyword(E::KActiveHandles, "active_handles");
    let k_address = g.keyword(E::KAddress, "address");
    let k_after = g.keyword(E::KAfter, "after");
    let k_alter = g.keyword(E::KAlter, "alter");
    let k_and = g.keyword(E::KAnd, "and");
    let k_as = g.keyword(E::KAs, "as");
    let k_backup_mode = g.keyword(E::KBackupMode, "backup_mode");
    let k_before = g.keyword(E::KBefore, "before");
    let k_buffer_size = g.keyword(E::KBufferSize, "buffer_size");
    let k_buffer_path = g.keyword(E::KBufferPath, "buffer_path");
    let k_between = g.keyword(E::KBetween, "between");
    let k_count = g.keyword(E::KCount, "count");
    let k_create = g.keyword(E::KCreate, "create");
    let k_critical = g.keyword(E::KCritical, "critical");
    let k_database = g.keyword(E::KDatabase, "database");
    let k_dbname = g.keyword(E::KDbname, "dbname");
    let k_dbpath = g.keyword(E::KDbpath, "dbpath");
    let k_debug = g.keyword(E::KDebug, "debug");
    let k_derivative = g.keyword(E::KDerivative, "derivative");
    let k_difference = g.keyword(E::KDifference, "difference");
    let k_drop = g.keyword(E::KDrop, "drop");
    let k_drop_threshold = g.keyword(E::KDropThreshold, "drop_threshold");
    let k_duration_log = g.keyword(E::KDurationLog, "duration_log");
    let k_duration_num = g.keyword(E::KDurationNum, "duration_num");
    let k_end = g.keyword(E::KEnd, "end");
    let k_error = g.keyword(E::KError, "error");
    let k_expression = g.keyword(E::KExpression, "expression");
    let k_false = g.keyword(E::KFalse, "false");
    let k_filter = g.keyword(E::KFilter, "filter");
    let k_float = g.keyword(E::KFloat, "float");
    let k_for = g.keyword(E::KFor, "for");
    let k_from = g.keyword(E::KFrom, "from");
    let k_full = g.keyword(E::KFull, "full");
    let k_grant = g.keyword(E::KGrant, "grant");
    let k_group = g.keyword(E::KGroup, "group");
    let k_groups = g.keyword(E::KGroups, "groups");
    let k_ignore_threshold = g.keyword(E::KIgnoreThreshold, "ignore_threshold");
    let k_info = g.keyword(E::KInfo, "info");
    let k_insert = g.keyword(E::KInsert, "insert");
    let k_integer = g.keyword(E::KInteger, "integer");
    let k_ip_support = g.keyword(E::KIpSupport, "ip_support");
    let k_length = g.keyword(E::KLength, "length");
    let k_libuv = g.keyword(E::KLibuv, "libuv");
    let k_limit = g.keyword(E::KLimit, "limit");
    let k_list = g.keyword(E::KList, "list");
    let k_log = g.keyword(E::KLog, "log");
    let k_log_level = g.keyword(E::KLogLevel, "log_level");
    let k_max = g.keyword(E::KMax, "max");
    let k_max_open_files = g.keyword(E::KMaxOpenFiles, "max_open_files");
    let k_mean = g.keyword(E::KMean, "mean");
    let k_median = g.keyword(E::KMedian, "median");
    let k_median_low = g.keyword(E::KMedianLow, "median_low");
    let k_median_high = g.keyword(E::KMedianHigh, "median_high");
    let k_mem_usage = g.keyword(E::KMemUsage, "mem_usage");
    let k_merge = g.keyword(E::KMerge, "merge");
    let k_min = g.keyword(E::KMin, "min");
    let k_modify = g.keyword(E::KModify, "modify");
    let k_name = g.keyword(E::KName, "name");
    let k_now = g.keyword(E::KNow, "now");
    let k_number = g.keyword(E::KNumber, "number");
    let k_online = g.keyword(E::KOnline, "online");
    let k_open_files = g.keyword(E::KOpenFiles, "open_files");
    let k_or = g.keyword(E::KOr, "or");
    let k_password = g.keyword(E::KPassword, "password");
    let k_points = g.keyword(E::KPoints, "points");
    let k_pool = g.keyword(E::KPool, "pool");
    let k_pools = g.keyword(E::KPools, "pools");
    let k_port = g.keyword(E::KPort, "port");
    let k_prefix = g.keyword(E::KPrefix, "prefix");
    let k_pvariance = g.keyword(E::KPvariance, "pvariance");
    let k_read = g.keyword(E::KRead, "read");
    let k_received_points = g.keyword(E::KReceivedPoints, "received_points");
    let k_reindex_progress = g.keyword(E::KReindexProgress, "reindex_progress");
    let k_revoke = g.keyword(E::KRevoke, "revoke");
    let k_select = g.keyword(E::KSelect, "select");
    let k_series = g.keyword(E::KSeries, "series");
    let k_server = g.keyword(E::KServer, "server");
    let k_servers = g.keyword(E::KServers, "servers");
    let k_set = g.keyword(E::KSet, "set");
    let k_shards = g.keyword(E::KShards, "shards");
    let k_show = g.keyword(E::KShow, "show");
    let k_sid = g.keyword(E::KSid, "sid");
    let k_size = g.keyword(E::KSize, "size");
    let k_start = g.keyword(E::KStart, "start");
    let k_startup_time = g.keyword(E::KStartupTime, "startup_time");
    let k_status = g.keyword(E::KStatus, "status");
    let k_string = g.keyword(E::KString, "string");
    let k_suffix = g.keyword(E::KSuffix, "suffix");
    let k_sum = g.keyword(E::KSum, "sum");
    let k_sync_progress = g.keyword(E::KSyncProgress, "sync_progress");
    let k_timeit = g.keyword(E::KTimeit, "timeit");
    let k_timezone = g.keyword(E::KTimezone, "timezone");
    let k_time_precision = g.keyword(E::KTimePrecision, "time_precision");
    let k_to = g.keyword(E::KTo, "to");
    let k_true = g.keyword(E::KTrue, "true");
    let k_type = g.keyword(E::KType, "type");
    let k_uptime = g.keyword(E::KUptime, "uptime");
    let k_user = g.keyword(E::KUser, "user");
    let k_users = g.keyword(E::KUsers, "users");
    let k_using = g.keyword(E::KUsing, "using");
    let k_uuid = g.keyword(E::KUuid, "uuid");
    let k_variance = g.keyword(E::KVariance, "variance");
    let k_version = g.keyword(E::KVersion, "version");
    let k_warning = g.keyword(E::KWarning, "warning");
    let k_where = g.keyword(E::KWhere, "where");
    let k_who_am_i = g.keyword(E::KWhoAmI, "who_am_i");
    let k_write = g.keyword(E::KWrite, "write");

    // `help`, the set-algebra separators and `points` each have a symbolic
    // spelling next to the keyword one.
    let k_help = {
        let word = g.keyword(None, "help");
        let mark = g.token(None, "?");
        g.choice(E::KHelp, true, vec![word, mark])
    };
    let k_union = {
        let syms = g.tokens(None, ", |");
        let word = g.keyword(None, "union");
        g.choice(E::KUnion, false, vec![syms, word])
    };
    let k_intersection = {
        let sym = g.token(None, "&");
        let word = g.keyword(None, "intersection");
        g.choice(E::KIntersection, false, vec![sym, word])
    };
    let k_symmetric_difference = {
        let sym = g.token(None, "^");
        let word = g.keyword(None, "symmetric_difference");
        g.choice(E::KSymmetricDifference, false, vec![sym, word])
    };
    let c_difference = {
        let sym = g.token(None, "-");
        g.choice(E::CDifference, false, vec![sym, k_difference])
    };

    let access_keywords = g.choice(
        E::AccessKeywords,
        false,
        vec![
            k_read, k_write, k_modify, k_full, k_select, k_show, k_list, k_count, k_create,
            k_insert, k_drop, k_grant, k_revoke, k_alter,
        ],
    );

    let boolean = g.choice(E::Boolean, false, vec![k_true, k_false]);

    let log_keywords = g.choice(
        E::LogKeywords,
        false,
        vec![k_debug, k_info, k_warning, k_error, k_critical],
    );

    // Expressions. One flat operator tier, chained left to right.
    let arith_ops = g.tokens(None, "+ - * % /");
    let int_expr = {
        let paren = g.sequence(None, vec![lparen, this, rparen]);
        let chain = g.sequence(None, vec![this, arith_ops, this]);
        g.prio(E::IntExpr, vec![r_integer, paren], vec![chain])
    };

    let string = g.choice(E::String, false, vec![r_singleq_str, r_doubleq_str]);

    let time_expr = {
        let paren = g.sequence(None, vec![lparen, this, rparen]);
        let chain = g.sequence(None, vec![this, arith_ops, this]);
        g.prio(
            E::TimeExpr,
            vec![r_time_str, k_now, string, r_integer, paren],
            vec![chain],
        )
    };

    // Column projections
    let series_columns = {
        let column = g.choice(
            None,
            false,
            vec![k_name, k_type, k_length, k_start, k_end, k_pool],
        );
        g.list(E::SeriesColumns, column, comma, 1, 0)
    };
    let shard_columns = {
        let column = g.choice(
            None,
            false,
            vec![k_sid, k_pool, k_server, k_size, k_start, k_end, k_type, k_status],
        );
        g.list(E::ShardColumns, column, comma, 1, 0)
    };
    let server_columns = {
        let column = g.choice(
            None,
            false,
            vec![
                // Local properties
                k_address,
                k_buffer_path,
                k_buffer_size,
                k_dbpath,
                k_ip_support,
                k_libuv,
                k_name,
                k_port,
                k_uuid,
                k_pool,
                k_version,
                k_online,
                k_startup_time,
                k_status,
                // Remote properties
                k_active_handles,
                k_log_level,
                k_max_open_files,
                k_mem_usage,
                k_open_files,
                k_received_points,
                k_reindex_progress,
                k_sync_progress,
                k_uptime,
            ],
        );
        g.list(E::ServerColumns, column, comma, 1, 0)
    };
    let group_columns = {
        let column = g.choice(None, false, vec![k_expression, k_name, k_series]);
        g.list(E::GroupColumns, column, comma, 1, 0)
    };
    let user_columns = {
        let column = g.choice(None, false, vec![k_name, k_access]);
        g.list(E::UserColumns, column, comma, 1, 0)
    };
    let pool_props = g.choice(E::PoolProps, false, vec![k_pool, k_servers, k_series]);
    let pool_columns = g.list(E::PoolColumns, pool_props, comma, 1, 0);

    // Comparator sets are restricted per field type.
    let bool_operator = g.tokens(E::BoolOperator, "== !=");
    let int_operator = g.tokens(E::IntOperator, "< > == != <= >=");
    let str_operator = g.tokens(E::StrOperator, "< > == != <= >= ~ !~");

    // WHERE predicates, one per resource type. Each is a priority over the
    // resource's atomic comparisons plus parentheses and the shared flat
    // and/or tier.
    let where_group = {
        let by_series = g.sequence(None, vec![k_series, int_operator, int_expr]);
        let str_field = g.choice(None, false, vec![k_expression, k_name]);
        let by_str = g.sequence(None, vec![str_field, str_operator, string]);
        let paren = g.sequence(None, vec![lparen, this, rparen]);
        let and_chain = g.sequence(None, vec![this, k_and, this]);
        let or_chain = g.sequence(None, vec![this, k_or, this]);
        let prio = g.prio(None, vec![by_series, by_str, paren], vec![and_chain, or_chain]);
        g.sequence(E::WhereGroup, vec![k_where, prio])
    };

    let where_pool = {
        let by_prop = g.sequence(None, vec![pool_props, int_operator, int_expr]);
        let paren = g.sequence(None, vec![lparen, this, rparen]);
        let and_chain = g.sequence(None, vec![this, k_and, this]);
        let or_chain = g.sequence(None, vec![this, k_or, this]);
        let prio = g.prio(None, vec![by_prop, paren], vec![and_chain, or_chain]);
        g.sequence(E::WherePool, vec![k_where, prio])
    };

    let where_series = {
        let int_field = g.choice(None, false, vec![k_length, k_pool]);
        let by_int = g.sequence(None, vec![int_field, int_operator, int_expr]);
        let by_name = g.sequence(None, vec![k_name, str_operator, string]);
        let time_field = g.choice(None, false, vec![k_start, k_end]);
        let by_time = g.sequence(None, vec![time_field, int_operator, time_expr]);
        let series_type = g.choice(None, false, vec![k_string, k_integer, k_float]);
        let by_type = g.sequence(None, vec![k_type, bool_operator, series_type]);
        let paren = g.sequence(None, vec![lparen, this, rparen]);
        let and_chain = g.sequence(None, vec![this, k_and, this]);
        let or_chain = g.sequence(None, vec![this, k_or, this]);
        let prio = g.prio(
            None,
            vec![by_int, by_name, by_time, by_type, paren],
            vec![and_chain, or_chain],
        );
        g.sequence(E::WhereSeries, vec![k_where, prio])
    };

    let where_server = {
        let int_field = g.choice(
            None,
            false,
            vec![
                k_active_handles,
                k_buffer_size,
                k_port,
                k_pool,
                k_startup_time,
                k_max_open_files,
                k_mem_usage,
                k_open_files,
                k_received_points,
                k_uptime,
            ],
        );
        let by_int = g.sequence(None, vec![int_field, int_operator, int_expr]);
        let str_field = g.choice(
            None,
            false,
            vec![
                k_address,
                k_buffer_path,
                k_dbpath,
                k_ip_support,
                k_libuv,
                k_name,
                k_uuid,
                k_version,
                k_status,
                k_reindex_progress,
                k_sync_progress,
            ],
        );
        let by_str = g.sequence(None, vec![str_field, str_operator, string]);
        let by_online = g.sequence(None, vec![k_online, bool_operator, boolean]);
        let by_log = g.sequence(None, vec![k_log_level, int_operator, log_keywords]);
        let paren = g.sequence(None, vec![lparen, this, rparen]);
        let and_chain = g.sequence(None, vec![this, k_and, this]);
        let or_chain = g.sequence(None, vec![this, k_or, this]);
        let prio = g.prio(
            None,
            vec![by_int, by_str, by_online, by_log, paren],
            vec![and_chain, or_chain],
        );
        g.sequence(E::WhereServer, vec![k_where, prio])
    };

    let where_shard = {
        let int_field = g.choice(None, false, vec![k_sid, k_pool, k_size]);
        let by_int = g.sequence(None, vec![int_field, int_operator, int_expr]);
        let str_field = g.choice(None, false, vec![k_server, k_status]);
        let by_str = g.sequence(None, vec![str_field, str_operator, string]);
        let time_field = g.choice(None, false, vec![k_start, k_end]);
        let by_time = g.sequence(None, vec![time_field, int_operator, time_expr]);
        let shard_type = g.choice(None, false, vec![k_number, k_log]);
        let by_type = g.sequence(None, vec![k_type, bool_operator, shard_type]);
        let paren = g.sequence(None, vec![lparen, this, rparen]);
        let and_chain = g.sequence(None, vec![this, k_and, this]);
        let or_chain = g.sequence(None, vec![this, k_or, this]);
        let prio = g.prio(
            None,
            vec![by_int, by_str, by_time, by_type, paren],
            vec![and_chain, or_chain],
        );
        g.sequence(E::WhereShard, vec![k_where, prio])
    };

    let where_user = {
        let by_name = g.sequence(None, vec![k_name, str_operator, string]);
        let by_access = g.sequence(None, vec![k_access, int_operator, access_keywords]);
        let paren = g.sequence(None, vec![lparen, this, rparen]);
        let and_chain = g.sequence(None, vec![this, k_and, this]);
        let or_chain = g.sequence(None, vec![this, k_or, this]);
        let prio = g.prio(None, vec![by_name, by_access, paren], vec![and_chain, or_chain]);
        g.sequence(E::WhereUser, vec![k_where, prio])
    };

    // Series selectors: names, group references and regular expressions in
    // one flat set-algebra chain; all four separators share a tier and
    // evaluate left to right.
    let series_sep = g.choice(
        E::SeriesSep,
        false,
        vec![k_union, c_difference, k_intersection, k_symmetric_difference],
    );
    let series_name = g.repeat(E::SeriesName, string, 1, 1);
    let group_name = g.repeat(E::GroupName, r_grave_str, 1, 1);
    let series_re = g.repeat(E::SeriesRe, r_regex, 1, 1);
    let uuid = g.choice(E::Uuid, false, vec![r_uuid_str, string]);
    let group_match = g.repeat(E::GroupMatch, r_grave_str, 1, 1);
    let series_match = {
        let term = g.choice(None, false, vec![series_name, group_match, series_re]);
        g.list(E::SeriesMatch, term, series_sep, 1, 0)
    };

    let limit_expr = g.sequence(E::LimitExpr, vec![k_limit, int_expr]);
    let before_expr = g.sequence(E::BeforeExpr, vec![k_before, time_expr]);
    let after_expr = g.sequence(E::AfterExpr, vec![k_after, time_expr]);
    let between_expr = g.sequence(E::BetweenExpr, vec![k_between, time_expr, k_and, time_expr]);
    let access_expr = g.list(E::AccessExpr, access_keywords, comma, 1, 0);

    let prefix_expr = g.sequence(E::PrefixExpr, vec![k_prefix, string]);
    let suffix_expr = g.sequence(E::SuffixExpr, vec![k_suffix, string]);

    // Aggregate pipeline functions
    let f_points = {
        let star = g.token(None, "*");
        g.choice(E::FPoints, false, vec![star, k_points])
    };
    let f_limit = {
        let reduction = g.choice(
            None,
            false,
            vec![
                k_mean,
                k_median,
                k_median_high,
                k_median_low,
                k_sum,
                k_min,
                k_max,
                k_count,
                k_variance,
                k_pvariance,
            ],
        );
        g.sequence(
            E::FLimit,
            vec![k_limit, lparen, int_expr, comma, reduction, rparen],
        )
    };
    let f_difference = {
        let arg = g.optional(None, time_expr);
        g.sequence(E::FDifference, vec![k_difference, lparen, arg, rparen])
    };
    let f_derivative = {
        let args = g.list(None, time_expr, comma, 0, 2);
        g.sequence(E::FDerivative, vec![k_derivative, lparen, args, rparen])
    };
    let f_mean = g.sequence(E::FMean, vec![k_mean, lparen, time_expr, rparen]);
    let f_median = g.sequence(E::FMedian, vec![k_median, lparen, time_expr, rparen]);
    let f_median_low = g.sequence(E::FMedianLow, vec![k_median_low, lparen, time_expr, rparen]);
    let f_median_high =
        g.sequence(E::FMedianHigh, vec![k_median_high, lparen, time_expr, rparen]);
    let f_sum = g.sequence(E::FSum, vec![k_sum, lparen, time_expr, rparen]);
    let f_min = g.sequence(E::FMin, vec![k_min, lparen, time_expr, rparen]);
    let f_max = g.sequence(E::FMax, vec![k_max, lparen, time_expr, rparen]);
    let f_count = g.sequence(E::FCount, vec![k_count, lparen, time_expr, rparen]);
    let f_variance = g.sequence(E::FVariance, vec![k_variance, lparen, time_expr, rparen]);
    let f_pvariance = g.sequence(E::FPvariance, vec![k_pvariance, lparen, time_expr, rparen]);
    let f_filter = {
        let operator = g.optional(None, str_operator);
        let operand = g.choice(None, true, vec![string, r_integer, r_float]);
        g.sequence(E::FFilter, vec![k_filter, lparen, operator, operand, rparen])
    };

    let aggregate_functions = {
        let function = g.choice(
            None,
            false,
            vec![
                f_points,
                f_limit,
                f_mean,
                f_sum,
                f_median,
                f_median_low,
                f_median_high,
                f_min,
                f_max,
                f_count,
                f_variance,
                f_pvariance,
                f_difference,
                f_derivative,
                f_filter,
            ],
        );
        let arrow = g.token(None, "=>");
        g.list(E::AggregateFunctions, function, arrow, 1, 0)
    };

    let select_aggregate = {
        let prefix = g.optional(None, prefix_expr);
        let suffix = g.optional(None, suffix_expr);
        g.sequence(E::SelectAggregate, vec![aggregate_functions, prefix, suffix])
    };

    let merge_as = {
        let using = g.sequence(None, vec![k_using, aggregate_functions]);
        let using = g.optional(None, using);
        g.sequence(E::MergeAs, vec![k_merge, k_as, string, using])
    };

    // Property assignments
    let set_address = g.sequence(E::SetAddress, vec![k_set, k_address, string]);
    let set_backup_mode = g.sequence(E::SetBackupMode, vec![k_set, k_backup_mode, boolean]);
    let set_drop_threshold =
        g.sequence(E::SetDropThreshold, vec![k_set, k_drop_threshold, r_float]);
    let set_expression = g.sequence(E::SetExpression, vec![k_set, k_expression, r_regex]);
    let set_ignore_threshold =
        g.sequence(E::SetIgnoreThreshold, vec![k_set, k_ignore_threshold, boolean]);
    let set_log_level = g.sequence(E::SetLogLevel, vec![k_set, k_log_level, log_keywords]);
    let set_name = g.sequence(E::SetName, vec![k_set, k_name, string]);
    let set_password = g.sequence(E::SetPassword, vec![k_set, k_password, string]);
    let set_port = g.sequence(E::SetPort, vec![k_set, k_port, r_uinteger]);
    let set_timezone = g.sequence(E::SetTimezone, vec![k_set, k_timezone, string]);

    // alter clauses
    let alter_database = {
        let assignment = g.choice(None, false, vec![set_drop_threshold, set_timezone]);
        g.sequence(E::AlterDatabase, vec![k_database, assignment])
    };
    let alter_group = {
        let assignment = g.choice(None, false, vec![set_expression, set_name]);
        g.sequence(E::AlterGroup, vec![k_group, group_name, assignment])
    };
    let alter_server = {
        let assignment = g.choice(
            None,
            false,
            vec![set_log_level, set_backup_mode, set_address, set_port],
        );
        g.sequence(E::AlterServer, vec![k_server, uuid, assignment])
    };
    let alter_servers = {
        let filter = g.optional(None, where_server);
        g.sequence(E::AlterServers, vec![k_servers, filter, set_log_level])
    };
    let alter_user = {
        let assignment = g.choice(None, false, vec![set_password, set_name]);
        g.sequence(E::AlterUser, vec![k_user, string, assignment])
    };

    // count clauses
    let opt_where_group = g.optional(None, where_group);
    let opt_where_pool = g.optional(None, where_pool);
    let opt_where_series = g.optional(None, where_series);
    let opt_where_server = g.optional(None, where_server);
    let opt_where_shard = g.optional(None, where_shard);
    let opt_where_user = g.optional(None, where_user);
    let opt_series_match = g.optional(None, series_match);

    let count_groups = g.sequence(E::CountGroups, vec![k_groups, opt_where_group]);
    let count_pools = g.sequence(E::CountPools, vec![k_pools, opt_where_pool]);
    let count_series =
        g.sequence(E::CountSeries, vec![k_series, opt_series_match, opt_where_series]);
    let count_servers = g.sequence(E::CountServers, vec![k_servers, opt_where_server]);
    let count_servers_received = g.sequence(
        E::CountServersReceived,
        vec![k_servers, k_received_points, opt_where_server],
    );
    let count_shards = g.sequence(E::CountShards, vec![k_shards, opt_where_shard]);
    let count_shards_size = g.sequence(E::CountShardsSize, vec![k_shards, k_size, opt_where_shard]);
    let count_users = g.sequence(E::CountUsers, vec![k_users, opt_where_user]);
    let count_series_length = g.sequence(
        E::CountSeriesLength,
        vec![k_series, k_length, opt_series_match, opt_where_series],
    );

    // create / drop / grant / revoke clauses
    let create_group = g.sequence(E::CreateGroup, vec![k_group, group_name, k_for, r_regex]);
    let create_user = g.sequence(E::CreateUser, vec![k_user, string, set_password]);

    let drop_group = g.sequence(E::DropGroup, vec![k_group, group_name]);
    let drop_series = {
        let threshold = g.optional(None, set_ignore_threshold);
        g.sequence(
            E::DropSeries,
            vec![k_series, opt_series_match, opt_where_series, threshold],
        )
    };
    let drop_shards = {
        let threshold = g.optional(None, set_ignore_threshold);
        g.sequence(E::DropShards, vec![k_shards, opt_where_shard, threshold])
    };
    let drop_server = g.sequence(E::DropServer, vec![k_server, uuid]);
    let drop_user = g.sequence(E::DropUser, vec![k_user, string]);

    let grant_user = {
        let password = g.optional(None, set_password);
        g.sequence(E::GrantUser, vec![k_user, string, password])
    };
    let revoke_user = g.sequence(E::RevokeUser, vec![k_user, string]);

    // list clauses
    let list_groups = {
        let columns = g.optional(None, group_columns);
        g.sequence(E::ListGroups, vec![k_groups, columns, opt_where_group])
    };
    let list_pools = {
        let columns = g.optional(None, pool_columns);
        g.sequence(E::ListPools, vec![k_pools, columns, opt_where_pool])
    };
    let list_series = {
        let columns = g.optional(None, series_columns);
        g.sequence(
            E::ListSeries,
            vec![k_series, columns, opt_series_match, opt_where_series],
        )
    };
    let list_servers = {
        let columns = g.optional(None, server_columns);
        g.sequence(E::ListServers, vec![k_servers, columns, opt_where_server])
    };
    let list_shards = {
        let columns = g.optional(None, shard_columns);
        g.sequence(E::ListShards, vec![k_shards, columns, opt_where_shard])
    };
    let list_users = {
        let columns = g.optional(None, user_columns);
        g.sequence(E::ListUsers, vec![k_users, columns, opt_where_user])
    };

    // Statements
    let alter_stmt = {
        let target = g.choice(
            None,
            false,
            vec![alter_user, alter_group, alter_server, alter_servers, alter_database],
        );
        g.sequence(E::AlterStmt, vec![k_alter, target])
    };

    let calc_stmt = g.repeat(E::CalcStmt, time_expr, 1, 1);

    let count_stmt = {
        // count_series/count_series_length and the servers/shards pairs
        // share a prefix; the greedy choice resolves them by length.
        let target = g.choice(
            None,
            true,
            vec![
                count_groups,
                count_pools,
                count_series,
                count_servers,
                count_servers_received,
                count_shards,
                count_shards_size,
                count_users,
                count_series_length,
            ],
        );
        g.sequence(E::CountStmt, vec![k_count, target])
    };

    let create_stmt = {
        let target = g.choice(None, true, vec![create_group, create_user]);
        g.sequence(E::CreateStmt, vec![k_create, target])
    };

    let drop_stmt = {
        let target = g.choice(
            None,
            false,
            vec![drop_group, drop_series, drop_shards, drop_server, drop_user],
        );
        g.sequence(E::DropStmt, vec![k_drop, target])
    };

    let grant_stmt = g.sequence(E::GrantStmt, vec![k_grant, access_expr, k_to, grant_user]);

    let list_stmt = {
        let target = g.choice(
            None,
            false,
            vec![list_series, list_users, list_shards, list_groups, list_servers, list_pools],
        );
        let limit = g.optional(None, limit_expr);
        g.sequence(E::ListStmt, vec![k_list, target, limit])
    };

    let revoke_stmt = g.sequence(E::RevokeStmt, vec![k_revoke, access_expr, k_from, revoke_user]);

    let select_stmt = {
        let aggregates = g.list(None, select_aggregate, comma, 1, 0);
        let window = g.choice(None, false, vec![after_expr, between_expr, before_expr]);
        let window = g.optional(None, window);
        let merge = g.optional(None, merge_as);
        g.sequence(
            E::SelectStmt,
            vec![
                k_select,
                aggregates,
                k_from,
                series_match,
                opt_where_series,
                window,
                merge,
            ],
        )
    };

    let show_stmt = {
        let property = g.choice(
            None,
            false,
            vec![
                k_active_handles,
                k_buffer_path,
                k_buffer_size,
                k_dbname,
                k_dbpath,
                k_drop_threshold,
                k_duration_log,
                k_duration_num,
                k_ip_support,
                k_libuv,
                k_log_level,
                k_max_open_files,
                k_mem_usage,
                k_open_files,
                k_pool,
                k_received_points,
                k_reindex_progress,
                k_server,
                k_startup_time,
                k_status,
                k_sync_progress,
                k_time_precision,
                k_timezone,
                k_uptime,
                k_uuid,
                k_version,
                k_who_am_i,
            ],
        );
        let properties = g.list(None, property, comma, 0, 0);
        g.sequence(E::ShowStmt, vec![k_show, properties])
    };

    let timeit_stmt = g.repeat(E::TimeitStmt, k_timeit, 1, 1);

    // Help navigation: the statement taxonomy one level deep, used only to
    // select a static help topic.
    let help_create_group = g.keyword(E::HelpCreateGroup, "group");
    let help_create_user = g.keyword(E::HelpCreateUser, "user");
    let help_create = {
        let topic = g.choice(None, true, vec![help_create_group, help_create_user]);
        let topic = g.optional(None, topic);
        g.sequence(E::HelpCreate, vec![k_create, topic])
    };
    let help_show = g.keyword(E::HelpShow, "show");
    let help_select = g.keyword(E::HelpSelect, "select");
    let help_drop_user = g.keyword(E::HelpDropUser, "user");
    let help_drop_server = g.keyword(E::HelpDropServer, "server");
    let help_drop_group = g.keyword(E::HelpDropGroup, "group");
    let help_drop_shards = g.keyword(E::HelpDropShards, "shards");
    let help_drop_series = g.keyword(E::HelpDropSeries, "series");
    let help_drop = {
        let topic = g.choice(
            None,
            true,
            vec![
                help_drop_user,
                help_drop_server,
                help_drop_group,
                help_drop_shards,
                help_drop_series,
            ],
        );
        let topic = g.optional(None, topic);
        g.sequence(E::HelpDrop, vec![k_drop, topic])
    };
    let help_revoke = g.keyword(E::HelpRevoke, "revoke");
    let help_functions = g.keyword(E::HelpFunctions, "functions");
    let help_count_users = g.keyword(E::HelpCountUsers, "users");
    let help_count_shards = g.keyword(E::HelpCountShards, "shards");
    let help_count_series = g.keyword(E::HelpCountSeries, "series");
    let help_count_groups = g.keyword(E::HelpCountGroups, "groups");
    let help_count_servers = g.keyword(E::HelpCountServers, "servers");
    let help_count_pools = g.keyword(E::HelpCountPools, "pools");
    let help_count = {
        let topic = g.choice(
            None,
            true,
            vec![
                help_count_users,
                help_count_shards,
                help_count_series,
                help_count_groups,
                help_count_servers,
                help_count_pools,
            ],
        );
        let topic = g.optional(None, topic);
        g.sequence(E::HelpCount, vec![k_count, topic])
    };
    let help_alter_servers = g.keyword(E::HelpAlterServers, "servers");
    let help_alter_database = g.keyword(E::HelpAlterDatabase, "database");
    let help_alter_server = g.keyword(E::HelpAlterServer, "server");
    let help_alter_user = g.keyword(E::HelpAlterUser, "user");
    let help_alter_group = g.keyword(E::HelpAlterGroup, "group");
    let help_alter = {
        let topic = g.choice(
            None,
            true,
            vec![
                help_alter_servers,
                help_alter_database,
                help_alter_server,
                help_alter_user,
                help_alter_group,
            ],
        );
        let topic = g.optional(None, topic);
        g.sequence(E::HelpAlter, vec![k_alter, topic])
    };
    let help_access = g.keyword(E::HelpAccess, "access");
    let help_grant = g.keyword(E::HelpGrant, "grant");
    let help_timezones = g.keyword(E::HelpTimezones, "timezones");
    let help_noaccess = g.keyword(E::HelpNoaccess, "noaccess");
    let help_list_shards = g.keyword(E::HelpListShards, "shards");
    let help_list_users = g.keyword(E::HelpListUsers, "users");
    let help_list_pools = g.keyword(E::HelpListPools, "pools");
    let help_list_servers = g.keyword(E::HelpListServers, "servers");
    let help_list_groups = g.keyword(E::HelpListGroups, "groups");
    let help_list_series = g.keyword(E::HelpListSeries, "series");
    let help_list = {
        let topic = g.choice(
            None,
            true,
            vec![
                help_list_shards,
                help_list_users,
                help_list_pools,
                help_list_servers,
                help_list_groups,
                help_list_series,
            ],
        );
        let topic = g.optional(None, topic);
        g.sequence(E::HelpList, vec![k_list, topic])
    };
    let help_timeit = g.keyword(E::HelpTimeit, "timeit");
    let help = {
        let topic = g.choice(
            None,
            true,
            vec![
                help_create,
                help_show,
                help_select,
                help_drop,
                help_revoke,
                help_functions,
                help_count,
                help_alter,
                help_access,
                help_grant,
                help_timezones,
                help_noaccess,
                help_list,
                help_timeit,
            ],
        );
        let topic = g.optional(None, topic);
        g.sequence(E::Help, vec![k_help, topic])
    };

    let start = {
        let statement = g.choice(
            None,
            false,
            vec![
                select_stmt,
                list_stmt,
                count_stmt,
                alter_stmt,
                create_stmt,
                drop_stmt,
                grant_stmt,
                revoke_stmt,
                show_stmt,
                calc_stmt,
                help,
            ],
        );
        let timeit = g.optional(None, timeit_stmt);
        let statement = g.optional(None, statement);
        let comment = g.optional(None, r_comment);
        g.sequence(E::Start, vec![timeit, statement, comment])
    };

    g.finish(start, KEYWORD_ALPHABET)
        .expect("the SiriQL grammar is statically well formed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grammar_builds() {
        let grammar = siri_grammar();
        assert!(grammar.parse("show status").is_ok());
    }
}
