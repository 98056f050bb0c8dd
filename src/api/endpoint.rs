pub type Endpoint = str;

pub const GET_STATUS: &Endpoint = "service/r2/getstatus.jsp";
pub const GET_STATISTIC: &Endpoint = "service/r2/getstatistic.jsp";
