/// Semantic identifier attached to a grammar element.
///
/// Every named element of the SiriQL grammar carries exactly one variant;
/// the query executor dispatches on these tags, never on raw text. The set
/// covers keywords (`K*`), lexical patterns (`R*`), clauses, statements and
/// help topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    // Lexical patterns
    RComment,
    RDoubleqStr,
    RFloat,
    RGraveStr,
    RInteger,
    RRegex,
    RSingleqStr,
    RTimeStr,
    RUinteger,
    RUuidStr,

    // Keywords
    KAccess,
    KActiveHandles,
    KAddress,
    KAfter,
    KAlter,
    KAnd,
    KAs,
    KBackupMode,
    KBefore,
    KBetween,
    KBufferPath,
    KBufferSize,
    KCount,
    KCreate,
    KCritical,
    KDatabase,
    KDbname,
    KDbpath,
    KDebug,
    KDerivative,
    KDifference,
    KDrop,
    KDropThreshold,
    KDurationLog,
    KDurationNum,
    KEnd,
    KError,
    KExpression,
    KFalse,
    KFilter,
    KFloat,
    KFor,
    KFrom,
    KFull,
    KGrant,
    KGroup,
    KGroups,
    KHelp,
    KIgnoreThreshold,
    KInfo,
    KInsert,
    KInteger,
    KIntersection,
    KIpSupport,
    KLength,
    KLibuv,
    KLimit,
    KList,
    KLog,
    KLogLevel,
    KMax,
    KMaxOpenFiles,
    KMean,
    KMedian,
    KMedianHigh,
    KMedianLow,
    KMemUsage,
    KMerge,
    KMin,
    KModify,
    KName,
    KNow,
    KNumber,
    KOnline,
    KOpenFiles,
    KOr,
    KPassword,
    KPoints,
    KPool,
    KPools,
    KPort,
    KPrefix,
    KPvariance,
    KRead,
    KReceivedPoints,
    KReindexProgress,
    KRevoke,
    KSelect,
    KSeries,
    KServer,
    KServers,
    KSet,
    KShards,
    KShow,
    KSid,
    KSize,
    KStart,
    KStartupTime,
    KStatus,
    KString,
    KSuffix,
    KSum,
    KSymmetricDifference,
    KSyncProgress,
    KTimePrecision,
    KTimeit,
    KTimezone,
    KTo,
    KTrue,
    KType,
    KUnion,
    KUptime,
    KUser,
    KUsers,
    KUsing,
    KUuid,
    KVariance,
    KVersion,
    KWarning,
    KWhere,
    KWhoAmI,
    KWrite,
    CDifference,

    // Shared building blocks
    AccessKeywords,
    Boolean,
    LogKeywords,
    IntExpr,
    String,
    TimeExpr,
    BoolOperator,
    IntOperator,
    StrOperator,
    Uuid,

    // Column projections
    SeriesColumns,
    ShardColumns,
    ServerColumns,
    GroupColumns,
    UserColumns,
    PoolProps,
    PoolColumns,

    // WHERE predicates
    WhereGroup,
    WherePool,
    WhereSeries,
    WhereServer,
    WhereShard,
    WhereUser,

    // Series selectors
    SeriesSep,
    SeriesName,
    GroupName,
    SeriesRe,
    GroupMatch,
    SeriesMatch,

    // Clause templates
    LimitExpr,
    BeforeExpr,
    AfterExpr,
    BetweenExpr,
    AccessExpr,
    PrefixExpr,
    SuffixExpr,

    // Aggregate functions
    FPoints,
    FLimit,
    FDifference,
    FDerivative,
    FMean,
    FMedian,
    FMedianLow,
    FMedianHigh,
    FSum,
    FMin,
    FMax,
    FCount,
    FVariance,
    FPvariance,
    FFilter,
    AggregateFunctions,
    SelectAggregate,
    MergeAs,

    // Property assignments
    SetAddress,
    SetBackupMode,
    SetDropThreshold,
    SetExpression,
    SetIgnoreThreshold,
    SetLogLevel,
    SetName,
    SetPassword,
    SetPort,
    SetTimezone,

    // alter clauses
    AlterDatabase,
    AlterGroup,
    AlterServer,
    AlterServers,
    AlterUser,

    // count clauses
    CountGroups,
    CountPools,
    CountSeries,
    CountSeriesLength,
    CountServers,
    CountServersReceived,
    CountShards,
    CountShardsSize,
    CountUsers,

    // create / drop / grant / revoke / list clauses
    CreateGroup,
    CreateUser,
    DropGroup,
    DropSeries,
    DropServer,
    DropShards,
    DropUser,
    GrantUser,
    RevokeUser,
    ListGroups,
    ListPools,
    ListSeries,
    ListServers,
    ListShards,
    ListUsers,

    // Statements
    AlterStmt,
    CalcStmt,
    CountStmt,
    CreateStmt,
    DropStmt,
    GrantStmt,
    ListStmt,
    RevokeStmt,
    SelectStmt,
    ShowStmt,
    TimeitStmt,

    // Help navigation
    Help,
    HelpAccess,
    HelpAlter,
    HelpAlterDatabase,
    HelpAlterGroup,
    HelpAlterServer,
    HelpAlterServers,
    HelpAlterUser,
    HelpCount,
    HelpCountGroups,
    HelpCountPools,
    HelpCountSeries,
    HelpCountServers,
    HelpCountShards,
    HelpCountUsers,
    HelpCreate,
    HelpCreateGroup,
    HelpCreateUser,
    HelpDrop,
    HelpDropGroup,
    HelpDropSeries,
    HelpDropServer,
    HelpDropShards,
    HelpDropUser,
    HelpFunctions,
    HelpGrant,
    HelpList,
    HelpListGroups,
    HelpListPools,
    HelpListSeries,
    HelpListServers,
    HelpListShards,
    HelpListUsers,
    HelpNoaccess,
    HelpRevoke,
    HelpSelect,
    HelpShow,
    HelpTimeit,
    HelpTimezones,

    // Entry point
    Start,
}

impl ElementId {
    /// Stable name used when rendering trees, e.g. `"select_stmt"`.
    pub fn name(self) -> String {
        let debug = format!("{:?}", self);
        let mut out = String::with_capacity(debug.len() + 4);
        for (i, ch) in debug.chars().enumerate() {
            if ch.is_ascii_uppercase() {
                if i > 0 {
                    out.push('_');
                }
                out.push(ch.to_ascii_lowercase());
            } else {
                out.push(ch);
            }
        }
        out
    }
}
