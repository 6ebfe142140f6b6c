//! Wire messages exchanged with input adapters and renderers.

pub mod paperio {
    #[derive(Clone, Copy, PartialEq, ::prost::Message)]
    pub struct PaperioInput {
        #[prost(enumeration = "SteeringMode", tag = "1")]
        pub mode: i32,
        /// Heading in radians for `ABSOLUTE_HEADING`, sign selects the
        /// direction for `RELATIVE_TURN`
        #[prost(double, tag = "2")]
        pub value: f64,
        #[prost(double, tag = "3")]
        pub target_x: f64,
        #[prost(double, tag = "4")]
        pub target_y: f64,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum SteeringMode {
        None = 0,
        AbsoluteHeading = 1,
        RelativeTurn = 2,
        Pointer = 3,
    }

    #[derive(Clone, Copy, PartialEq, ::prost::Message)]
    pub struct TrailSample {
        #[prost(double, tag = "1")]
        pub x: f64,
        #[prost(double, tag = "2")]
        pub y: f64,
        #[prost(int32, tag = "3")]
        pub col: i32,
        #[prost(int32, tag = "4")]
        pub row: i32,
    }

    #[derive(Clone, Copy, PartialEq, ::prost::Message)]
    pub struct PlayerView {
        #[prost(double, tag = "1")]
        pub x: f64,
        #[prost(double, tag = "2")]
        pub y: f64,
        #[prost(double, tag = "3")]
        pub angle: f64,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct PaperioState {
        #[prost(uint32, tag = "1")]
        pub tick: u32,
        #[prost(uint32, tag = "2")]
        pub grid_width: u32,
        #[prost(uint32, tag = "3")]
        pub grid_height: u32,
        /// Row-major, one byte per cell: 0 free, 1 owned
        #[prost(bytes = "vec", tag = "4")]
        pub cells: Vec<u8>,
        #[prost(message, repeated, tag = "5")]
        pub trail: Vec<TrailSample>,
        #[prost(message, optional, tag = "6")]
        pub player: Option<PlayerView>,
        #[prost(bool, tag = "7")]
        pub alive: bool,
        /// Cell edge length in world pixels
        #[prost(double, tag = "8")]
        pub tile_size: f64,
    }
}
