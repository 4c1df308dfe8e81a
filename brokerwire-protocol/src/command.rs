use std::fmt;

macro_rules! command_codes {
    ($($name:ident = $code:literal,)*) => {
        /// Numeric identifier of a broker RPC, written after the frame length.
        #[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
        pub enum CommandCode {
            $($name,)*
            /// Any code this crate has no name for.
            Other(u32),
        }

        impl CommandCode {
            pub fn code(self) -> u32 {
                match self {
                    $(CommandCode::$name => $code,)*
                    CommandCode::Other(code) => code,
                }
            }
        }

        impl From<u32> for CommandCode {
            fn from(value: u32) -> Self {
                match value {
                    $($code => CommandCode::$name,)*
                    other => CommandCode::Other(other),
                }
            }
        }
    };
}

command_codes! {
    Ping = 1,
    GetStats = 10,
    GetMe = 20,
    GetClient = 21,
    GetClients = 22,
    GetUser = 31,
    GetUsers = 32,
    CreateUser = 33,
    DeleteUser = 34,
    UpdateUser = 35,
    UpdatePermissions = 36,
    ChangePassword = 37,
    LoginUser = 38,
    LogoutUser = 39,
    GetPersonalAccessTokens = 41,
    CreatePersonalAccessToken = 42,
    DeletePersonalAccessToken = 43,
    LoginWithPersonalAccessToken = 44,
    PollMessages = 100,
    SendMessages = 101,
    FlushUnsavedBuffer = 102,
    GetConsumerOffset = 120,
    StoreConsumerOffset = 121,
    GetStream = 200,
    GetStreams = 201,
    CreateStream = 202,
    DeleteStream = 203,
    UpdateStream = 204,
    PurgeStream = 205,
    GetTopic = 300,
    GetTopics = 301,
    CreateTopic = 302,
    DeleteTopic = 303,
    UpdateTopic = 304,
    PurgeTopic = 305,
    CreatePartitions = 402,
    DeletePartitions = 403,
    GetConsumerGroup = 600,
    GetConsumerGroups = 601,
    CreateConsumerGroup = 602,
    DeleteConsumerGroup = 603,
    JoinConsumerGroup = 604,
    LeaveConsumerGroup = 605,
}

impl From<CommandCode> for u32 {
    fn from(command: CommandCode) -> Self {
        command.code()
    }
}

impl fmt::Display for CommandCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandCode::Other(code) => write!(f, "command {code}"),
            named => write!(f, "{named:?} ({})", named.code()),
        }
    }
}
